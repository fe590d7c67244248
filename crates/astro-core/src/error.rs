//! Error types for astro-core

use thiserror::Error;

/// Main error type for astro-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Reply parse error: {0}")]
    ReplyParse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for astro-core
pub type Result<T> = std::result::Result<T, Error>;
