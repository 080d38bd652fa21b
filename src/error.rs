use thiserror::Error;

/// Errors that can occur while generating repository documentation
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Invalid GitHub URL '{input}'. Please use format: https://github.com/owner/repo")]
    InvalidUrl { input: String },

    #[error("Content not found: {path}")]
    NotFound { path: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited by remote service: {message}")]
    RateLimited { message: String },

    #[error("Invalid remote structure: {message}")]
    InvalidStructure { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to decode file content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Completion API error: {message}")]
    Llm { message: String },
}

/// Result type alias for documentation operations
pub type Result<T> = std::result::Result<T, DocError>;
