pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod github;
pub mod llm;
pub mod render;
pub mod replication;
pub mod repo_url;
pub mod source;
pub mod tree;
pub mod types;

pub use analyzer::{analyze, ProjectType};
pub use config::{ClientConfig, GenerateOptions, LlmConfig};
pub use document::{assemble_readme, ReadmeDocument, ReadmeParts};
pub use error::{DocError, Result};
pub use generator::ReadmeGenerator;
pub use github::GitHubSource;
pub use llm::{CompletionProvider, OpenAiClient};
pub use render::render_tree;
pub use repo_url::RepoRef;
pub use source::RepositoryApi;
pub use tree::{build_tree, collect_files, IGNORED_DIRS};
pub use types::{
    DirectoryEntry, DirectoryListing, EntryType, FileContent, LanguageStats, RepoMetadata,
    TreeNode,
};
