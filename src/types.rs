use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_provider::DataLocale;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Represents a file's content and metadata
#[derive(Debug, Clone)]
pub struct FileContent {
    /// The raw bytes of the file
    pub content: bytes::Bytes,
    /// The path where this file was found
    pub source_path: String,
    /// Optional ETag or version identifier
    pub etag: Option<String>,
}

impl FileContent {
    /// Content as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Represents an entry in a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Name of the file or folder
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// Type of entry
    pub entry_type: EntryType,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            entry_type: EntryType::File,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            entry_type: EntryType::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

/// Type of directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

/// Result of listing a directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    /// The path that was listed
    pub path: String,
    /// Entries found in the directory
    pub entries: Vec<DirectoryEntry>,
}

/// Repository owner as reported by the hosting API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoLicense {
    pub name: String,
}

/// Repository metadata, deserialized straight from `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub clone_url: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub owner: RepoOwner,
    #[serde(default)]
    pub license: Option<RepoLicense>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub default_branch: String,
}

impl RepoMetadata {
    /// Description, treating an empty string the same as a missing one
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn license_name(&self) -> Option<&str> {
        self.license.as_ref().map(|l| l.name.as_str())
    }
}

/// Language name to byte count, in the order the API reported them
/// (largest first). The first key is the primary language.
pub type LanguageStats = IndexMap<String, u64>;

/// A node of the rendered repository tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File { name: String },
    Dir { name: String, children: Vec<TreeNode> },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name } | TreeNode::Dir { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::File { .. } => &[],
            TreeNode::Dir { children, .. } => children,
        }
    }

    /// Sibling order: directories before files, then names in locale order
    pub fn sibling_order(a: &TreeNode, b: &TreeNode) -> Ordering {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| locale_cmp(a.name(), b.name()))
    }
}

thread_local! {
    // Collator is not Sync, so each thread builds its own from compiled data
    static COLLATOR: Option<Collator> =
        Collator::try_new(&DataLocale::default(), CollatorOptions::new()).ok();
}

/// Compare names with the root-locale Unicode collation
///
/// Punctuation sorts before digits, digits before letters, accents are
/// secondary and lowercase wins a case-only tie. Names that collate equal
/// fall back to code point order so the result is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
        })
        .then_with(|| a.cmp(b))
}
