//! Error types for astro-web

use thiserror::Error;

/// astro-web error type
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(String),

    #[error("Core error: {0}")]
    Core(#[from] astro_core::Error),

    #[error("Voice error: {0}")]
    Voice(#[from] astro_voice::VoiceError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WebError>;
