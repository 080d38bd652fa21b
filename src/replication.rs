use tracing::{info, warn};

use crate::{
    error::Result,
    llm::CompletionProvider,
    source::RepositoryApi,
    tree::collect_files,
    types::{LanguageStats, RepoMetadata},
};

/// Section emitted when the prompt could not be produced
pub const REPLICATION_PLACEHOLDER: &str = "## Code Replication Prompt

*Failed to generate AI prompt. Please check your OpenAI API key and try again.*";

/// One file included verbatim in the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFile {
    pub path: String,
    pub content: String,
}

/// Fetch the contents of the first `limit` files, skipping any that fail
pub async fn gather_files(api: &dyn RepositoryApi, limit: usize) -> Vec<PromptFile> {
    let paths = collect_files(api, "").await;
    info!(total = paths.len(), limit, "Collected repository files");

    let mut files = Vec::new();
    for path in paths.into_iter().take(limit) {
        match api.fetch_file(&path).await {
            Ok(file) => files.push(PromptFile {
                content: file.text(),
                path,
            }),
            Err(e) => warn!(path = %path, error = %e, "Failed to fetch file"),
        }
    }
    files
}

/// Build the free-text prompt sent to the completion provider
pub fn build_prompt(
    metadata: &RepoMetadata,
    languages: &LanguageStats,
    files: &[PromptFile],
) -> String {
    let language = languages.keys().next().map(String::as_str).unwrap_or("Unknown");
    let description = metadata.description().unwrap_or("");

    let file_blocks = files
        .iter()
        .map(|f| format!("### {}\n```\n{}\n```", f.path, f.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are an expert software engineer. I want you to recreate this exact GitHub repository: {url}

Repository details:
- Name: {name}
- Description: {description}
- Language: {language}

Here are the files from the repository:

{file_blocks}

Please provide:
1. Complete code for each file to recreate this project exactly
2. A step-by-step guide to set up and run the project
3. All necessary dependencies and configurations

Make sure the code is 100% identical and functional.",
        url = metadata.html_url,
        name = metadata.name,
    )
}

/// Produce the replication section, or an error if the provider failed
///
/// Gathers the first few source files, asks the provider to reproduce the
/// project from them and formats the exchange as a README section.
pub async fn generate_replication_prompt(
    api: &dyn RepositoryApi,
    provider: &dyn CompletionProvider,
    metadata: &RepoMetadata,
    languages: &LanguageStats,
    file_limit: usize,
) -> Result<String> {
    let files = gather_files(api, file_limit).await;
    let prompt = build_prompt(metadata, languages, &files);
    let response = provider.complete(&prompt).await?;

    Ok(format!(
        "## 🤖 AI-Generated Code Replication Prompt\n\n\
         **Use this prompt with an AI agent to recreate the exact same project:**\n\n\
         ```\n{}\n```\n\n**AI Response:**\n\n{}",
        prompt, response
    ))
}
