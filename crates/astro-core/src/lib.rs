//! astro-core: Astro-Brief Core Library
//!
//! Configuration, the shared error type, and the Gemini client that turns a
//! transcript (and optional image) into a short narrated answer with
//! sonification data.

pub mod config;
pub mod error;
pub mod llm;

pub use config::{Config, DeepgramConfig, GeminiConfig, KeyStatus, MurfConfig, ServerConfig};
pub use error::{Error, Result};
pub use llm::{GeminiClient, InlineImage, ModelReply, build_prompt, parse_reply};
