//! Error types for astro-voice

use thiserror::Error;

/// astro-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Speech recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;
