//! Gemini client and reply handling
//!
//! Sends the transcript (plus an optional image) to the generative language
//! API, falling back across a list of models, and parses the free-form reply.

mod client;
mod reply;
mod types;

pub use client::GeminiClient;
pub use reply::{ModelReply, build_prompt, parse_reply};
pub use types::*;
