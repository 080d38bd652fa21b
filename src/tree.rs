use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::{
    source::RepositoryApi,
    types::{DirectoryEntry, TreeNode},
};

/// Directory names that are never listed or descended into
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    "__pycache__",
    "venv",
    ".venv",
];

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub fn is_ignored(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Fetch one listing, degrading any failure to an empty listing
async fn list_or_empty(api: &dyn RepositoryApi, path: &str) -> Vec<DirectoryEntry> {
    match api.list_directory(path).await {
        Ok(listing) => listing.entries,
        Err(e) => {
            let shown = if path.is_empty() { "/" } else { path };
            warn!(
                source = %api.identifier(),
                path = shown,
                error = %e,
                "Skipping unreadable directory"
            );
            Vec::new()
        }
    }
}

/// Recursively expand the directory at `path` into a sorted tree
///
/// Directories at `max_depth` are emitted without children and are never
/// fetched. Ignored names contribute nothing. A listing that cannot be
/// fetched counts as empty, so the caller always gets a (possibly partial)
/// tree back.
pub fn build_tree<'a>(
    api: &'a dyn RepositoryApi,
    path: &'a str,
    depth: usize,
    max_depth: usize,
) -> BoxFuture<'a, Vec<TreeNode>> {
    Box::pin(async move {
        if depth >= max_depth {
            return Vec::new();
        }

        let mut nodes = Vec::new();
        for entry in list_or_empty(api, path).await {
            if is_ignored(&entry.name) {
                continue;
            }

            if entry.is_dir() {
                let children = build_tree(api, &entry.path, depth + 1, max_depth).await;
                nodes.push(TreeNode::Dir {
                    name: entry.name,
                    children,
                });
            } else {
                nodes.push(TreeNode::File { name: entry.name });
            }
        }

        nodes.sort_by(TreeNode::sibling_order);
        nodes
    })
}

/// Collect every file path below `path`, depth-first in API order
///
/// Unlike [`build_tree`] this has no depth bound. Ignored directories are
/// not descended; files are kept whatever their name.
pub async fn collect_files(api: &dyn RepositoryApi, path: &str) -> Vec<String> {
    let mut files = Vec::new();
    collect_into(api, path.to_string(), &mut files).await;
    files
}

fn collect_into<'a>(
    api: &'a dyn RepositoryApi,
    path: String,
    files: &'a mut Vec<String>,
) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        for entry in list_or_empty(api, &path).await {
            if !entry.is_dir() {
                files.push(entry.path);
            } else if !is_ignored(&entry.name) {
                collect_into(api, entry.path, files).await;
            }
        }
    })
}
