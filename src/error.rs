/// Error types for notion-scribe
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No transcript found: {0}")]
    TranscriptNotFound(String),

    #[error("Could not extract a page id from URL: {0}")]
    UrlParse(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Entity linking error: {0}")]
    EntityLink(String),

    #[error("Content too large: {len} characters exceeds the {limit} character page limit")]
    ContentTooLarge { len: usize, limit: usize },

    #[error("Notion API error: {0}")]
    Notion(String),

    #[error("LLM service error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
