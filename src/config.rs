use crate::error::{DocError, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_REPLICATION_FILE_LIMIT: usize = 10;

/// Settings for the repository hosting API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_base_url: String,
    /// Optional token; raises rate limits but is not needed for public repositories
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            user_agent: concat!("repo-docgen/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Settings for the chat-completion API
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_OPENAI_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// Which sections one generation request should produce
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub include_tree: bool,
    pub include_analysis: bool,
    pub include_replication: bool,
    /// Recursion bound for the folder tree
    pub max_depth: usize,
    /// How many files feed the replication prompt
    pub replication_file_limit: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_tree: true,
            include_analysis: true,
            include_replication: false,
            max_depth: DEFAULT_MAX_DEPTH,
            replication_file_limit: DEFAULT_REPLICATION_FILE_LIMIT,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(DocError::InvalidConfig {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GenerateOptions::default();
        assert!(options.include_tree);
        assert!(options.include_analysis);
        assert!(!options.include_replication);
        assert_eq!(options.max_depth, 3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let options = GenerateOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(DocError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_blank_token_dropped() {
        let config = ClientConfig::default().with_token(Some("  ".to_string()));
        assert!(config.token.is_none());

        let config = ClientConfig::default().with_base_url("http://localhost:1234/");
        assert_eq!(config.api_base_url, "http://localhost:1234");
    }
}
