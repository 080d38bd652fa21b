use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{DocError, Result},
    repo_url::RepoRef,
    source::RepositoryApi,
    types::{DirectoryEntry, DirectoryListing, EntryType, FileContent, LanguageStats, RepoMetadata},
};

/// GitHub-backed repository source
///
/// Talks to the GitHub REST API:
/// - `/repos/{owner}/{repo}` for metadata
/// - `/repos/{owner}/{repo}/contents/{path}` for listings and file bodies
/// - `/repos/{owner}/{repo}/languages` for language statistics
#[derive(Clone)]
pub struct GitHubSource {
    client: Client,
    repo: RepoRef,
    config: ClientConfig,
}

#[derive(Deserialize)]
struct GitHubApiEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
}

#[derive(Deserialize)]
struct GitHubFileBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    sha: Option<String>,
}

impl GitHubSource {
    /// Create a new GitHub source for one repository
    pub fn new(repo: RepoRef, config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            repo,
            config,
        }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Build an API URL under `/repos/{owner}/{repo}`, percent-encoding each segment
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let invalid = || DocError::InvalidConfig {
            message: format!("Invalid API base URL '{}'", self.config.api_base_url),
        };

        let mut url = Url::parse(&self.config.api_base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn repo_url(&self) -> Result<Url> {
        self.endpoint(std::iter::empty())
    }

    /// Build the contents API URL for a path (empty path = root)
    fn contents_url(&self, path: &str) -> Result<Url> {
        self.endpoint(
            std::iter::once("contents").chain(path.split('/').filter(|s| !s.is_empty())),
        )
    }

    fn languages_url(&self) -> Result<Url> {
        self.endpoint(["languages"])
    }

    fn get(&self, url: Url) -> RequestBuilder {
        debug!(url = %url, "GitHub request");
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");

        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check if an error is a rate limit error
    fn is_rate_limit_error(&self, status: StatusCode) -> bool {
        status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Map a non-success response to the matching error
    async fn error_for(&self, response: Response, path: &str) -> DocError {
        match response.status() {
            StatusCode::NOT_FOUND => DocError::NotFound {
                path: path.to_string(),
            },
            status if self.is_rate_limit_error(status) => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "GitHub API rate limit exceeded".to_string());
                DocError::RateLimited { message }
            }
            status => {
                let message = format!(
                    "Unexpected status {}: {}",
                    status,
                    response.text().await.unwrap_or_default()
                );
                DocError::InvalidStructure { message }
            }
        }
    }
}

fn entry_type_from_api(kind: &str) -> EntryType {
    match kind {
        "dir" => EntryType::Dir,
        // symlinks and submodules render as plain files
        _ => EntryType::File,
    }
}

/// Decode the base64 body the contents API returns (wrapped at 60 columns)
fn decode_base64_body(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

#[async_trait]
impl RepositoryApi for GitHubSource {
    async fn fetch_repository(&self) -> Result<RepoMetadata> {
        let response = self.get(self.repo_url()?).send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, &self.repo.to_string()).await);
        }

        Ok(response.json().await?)
    }

    async fn list_directory(&self, path: &str) -> Result<DirectoryListing> {
        let response = self.get(self.contents_url(path)?).send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, path).await);
        }

        // A file path yields an object rather than an array
        let body: serde_json::Value = response.json().await?;
        if !body.is_array() {
            return Err(DocError::InvalidStructure {
                message: format!("'{}' is not a directory", path),
            });
        }
        let api_entries: Vec<GitHubApiEntry> = serde_json::from_value(body)?;

        let entries = api_entries
            .into_iter()
            .map(|e| DirectoryEntry {
                entry_type: entry_type_from_api(&e.entry_type),
                name: e.name,
                path: e.path,
            })
            .collect();

        Ok(DirectoryListing {
            path: path.to_string(),
            entries,
        })
    }

    async fn fetch_languages(&self) -> Result<LanguageStats> {
        let response = self.get(self.languages_url()?).send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, "languages").await);
        }

        Ok(response.json().await?)
    }

    async fn fetch_file(&self, path: &str) -> Result<FileContent> {
        let response = self.get(self.contents_url(path)?).send().await?;

        if !response.status().is_success() {
            return Err(self.error_for(response, path).await);
        }

        let body: GitHubFileBody = response.json().await?;
        match (body.content, body.encoding.as_deref()) {
            (Some(content), Some("base64")) => Ok(FileContent {
                content: decode_base64_body(&content)?.into(),
                source_path: path.to_string(),
                etag: body.sha,
            }),
            _ => Err(DocError::InvalidStructure {
                message: format!("No inline base64 content for '{}'", path),
            }),
        }
    }

    fn identifier(&self) -> String {
        format!("github://{}/{}", self.repo.owner, self.repo.repo)
    }
}
