//! astro-voice: Speech recognition and synthesis for Astro-Brief
//!
//! - **Speech Recognition**: Deepgram pre-recorded audio API
//! - **Text-to-Speech**: Murf streaming API
//! - **Speech cleanup**: strips markdown emphasis before synthesis
//!
//! ## Usage
//!
//! ```rust,ignore
//! use astro_core::Config;
//! use astro_voice::{DeepgramClient, MurfClient, clean_for_speech};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let stt = DeepgramClient::new(&config.deepgram)?;
//!     let tts = MurfClient::new(&config.murf)?;
//!
//!     let audio = std::fs::read("question.webm")?;
//!     let transcript = stt.transcribe(&audio).await?;
//!
//!     let speech = tts.synthesize(&clean_for_speech(&transcript.text)).await?;
//!     std::fs::write("answer.mp3", &speech.audio_data)?;
//!     Ok(())
//! }
//! ```

pub mod deepgram;
pub mod error;
pub mod murf;
pub mod text;

pub use deepgram::{DeepgramClient, Transcript};
pub use error::{Result, VoiceError};
pub use murf::{MurfClient, SynthesisResult};
pub use text::clean_for_speech;
