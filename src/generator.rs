use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    analyzer::analyze,
    config::GenerateOptions,
    document::{assemble_readme, ReadmeDocument, ReadmeParts},
    error::{DocError, Result},
    llm::CompletionProvider,
    render::render_tree,
    replication::{generate_replication_prompt, REPLICATION_PLACEHOLDER},
    source::RepositoryApi,
    tree::build_tree,
    types::{DirectoryEntry, LanguageStats, RepoMetadata},
};

/// Runs one documentation generation against a repository
///
/// Every call starts from scratch; nothing is kept between generations.
pub struct ReadmeGenerator {
    api: Arc<dyn RepositoryApi>,
    completion: Option<Arc<dyn CompletionProvider>>,
    options: GenerateOptions,
}

impl ReadmeGenerator {
    pub fn new(api: Arc<dyn RepositoryApi>, options: GenerateOptions) -> Self {
        Self {
            api,
            completion: None,
            options,
        }
    }

    /// Attach the provider used for the replication prompt
    pub fn with_completion(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.completion = Some(provider);
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate the README
    ///
    /// Fails only when the options are invalid or the repository itself
    /// cannot be fetched. Everything after that degrades instead of failing.
    pub async fn generate(&self) -> Result<ReadmeDocument> {
        self.options.validate()?;
        let source = self.api.identifier();

        let metadata = self.api.fetch_repository().await.map_err(|e| match e {
            DocError::NotFound { .. } => DocError::NotFound {
                path: format!("{} (repository not found or not accessible)", source),
            },
            other => other,
        })?;
        info!(%source, name = %metadata.name, "Fetched repository metadata");

        let root_entries: Vec<DirectoryEntry> = match self.api.list_directory("").await {
            Ok(listing) => listing.entries,
            Err(e) => {
                warn!(%source, error = %e, "Root listing unavailable");
                Vec::new()
            }
        };

        let languages = match self.api.fetch_languages().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!(%source, error = %e, "Language statistics unavailable");
                LanguageStats::new()
            }
        };

        let folder_tree = if self.options.include_tree {
            info!(max_depth = self.options.max_depth, "Building folder structure tree");
            let tree = build_tree(self.api.as_ref(), "", 0, self.options.max_depth).await;
            render_tree(&tree)
        } else {
            String::new()
        };

        let analysis = if self.options.include_analysis {
            info!("Generating project analysis");
            analyze(&metadata, &root_entries, &languages)
        } else {
            String::new()
        };

        let replication = if self.options.include_replication {
            info!("Generating code replication prompt");
            self.replication_section(&metadata, &languages).await
        } else {
            String::new()
        };

        let markdown = assemble_readme(&ReadmeParts {
            metadata: &metadata,
            root_entries: &root_entries,
            languages: &languages,
            folder_tree: &folder_tree,
            analysis: &analysis,
            replication: &replication,
        });
        info!(bytes = markdown.len(), "Documentation generated");

        Ok(ReadmeDocument { markdown })
    }

    async fn replication_section(
        &self,
        metadata: &RepoMetadata,
        languages: &LanguageStats,
    ) -> String {
        let Some(provider) = &self.completion else {
            warn!("No completion provider configured, skipping replication prompt");
            return REPLICATION_PLACEHOLDER.to_string();
        };

        match generate_replication_prompt(
            self.api.as_ref(),
            provider.as_ref(),
            metadata,
            languages,
            self.options.replication_file_limit,
        )
        .await
        {
            Ok(section) => section,
            Err(e) => {
                warn!(error = %e, "Failed to generate code replication prompt, continuing without it");
                REPLICATION_PLACEHOLDER.to_string()
            }
        }
    }
}
