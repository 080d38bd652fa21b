use async_trait::async_trait;
use crate::{
    error::Result,
    types::{DirectoryListing, FileContent, LanguageStats, RepoMetadata},
};

/// Read-only view of one hosted repository
///
/// Implementors are bound to a single owner/repository pair and expose the
/// handful of calls documentation generation needs.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Fetch repository metadata
    ///
    /// Returns `DocError::NotFound` if the repository doesn't exist or is private
    async fn fetch_repository(&self) -> Result<RepoMetadata>;

    /// List the immediate children of a directory (empty path = repository root)
    ///
    /// Returns `DocError::NotFound` if the directory doesn't exist
    async fn list_directory(&self, path: &str) -> Result<DirectoryListing>;

    /// Language byte counts, largest first
    async fn fetch_languages(&self) -> Result<LanguageStats>;

    /// Fetch a single file by its path
    async fn fetch_file(&self, path: &str) -> Result<FileContent>;

    /// Get a human-readable identifier for this source (for logging/debugging)
    fn identifier(&self) -> String;
}
