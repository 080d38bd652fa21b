use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DocError, Result};

static GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[/.@])github\.com/([^/\s]+)/([^/\s?#]+)").expect("static regex is valid")
});

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse a repository URL such as `https://github.com/owner/repo(.git)`
    ///
    /// Extra path segments after the repository name are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || DocError::InvalidUrl {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let caps = GITHUB_URL.captures(trimmed).ok_or_else(invalid)?;
        let owner = caps[1].to_string();
        let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]).to_string();

        if repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self { owner, repo })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
