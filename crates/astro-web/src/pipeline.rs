//! Transcribe, answer, speak
//!
//! The three vendor calls run strictly in sequence. Every stage is
//! best-effort: a failure is logged and replaced by a default so the caller
//! always receives a [`BriefResponse`].

use std::sync::Arc;

use astro_core::{GeminiClient, InlineImage, ModelReply, build_prompt};
use astro_voice::{DeepgramClient, MurfClient, SynthesisResult, clean_for_speech};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::Result;

/// Answer given when nothing was heard and no image was sent
pub const NO_SPEECH_MESSAGE: &str =
    "I'm sorry, I didn't catch that. Could you please speak closer to the microphone?";

/// Answer given when every model failed
pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "I am having trouble connecting to the stars right now. Please try again.";

/// Speech-to-text stage
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}

/// Language model stage. `None` means no model produced a usable reply.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, prompt: &str, image: Option<&InlineImage>) -> Option<ModelReply>;
}

/// Text-to-speech stage
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult>;
}

#[async_trait]
impl Transcriber for DeepgramClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        Ok(DeepgramClient::transcribe(self, audio).await?.text)
    }
}

#[async_trait]
impl Responder for GeminiClient {
    async fn respond(&self, prompt: &str, image: Option<&InlineImage>) -> Option<ModelReply> {
        self.generate_with_fallback(prompt, image).await
    }
}

#[async_trait]
impl Synthesizer for MurfClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult> {
        Ok(MurfClient::synthesize(self, text).await?)
    }
}

/// `/process_audio` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefResponse {
    /// What the user said
    pub user_text: String,
    /// The answer, as generated (markdown markers included)
    pub ai_text: String,
    /// Spoken answer, base64 encoded; `null` when synthesis failed
    pub audio_base64: Option<String>,
    /// Values for the page to sonify
    pub sonification_data: Vec<serde_json::Number>,
}

/// The transcribe -> answer -> speak sequence
#[derive(Clone)]
pub struct AstroPipeline {
    transcriber: Arc<dyn Transcriber>,
    responder: Arc<dyn Responder>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl AstroPipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        responder: Arc<dyn Responder>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            transcriber,
            responder,
            synthesizer,
        }
    }

    /// Build the pipeline from the configured vendor clients
    pub fn from_config(config: &astro_core::Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(DeepgramClient::new(&config.deepgram)?),
            Arc::new(GeminiClient::new(&config.gemini)?),
            Arc::new(MurfClient::new(&config.murf)?),
        ))
    }

    /// Run the whole sequence. Never fails.
    pub async fn run(&self, audio: &[u8], image: Option<InlineImage>) -> BriefResponse {
        if image.is_some() {
            info!("Processing vision data");
        }

        let transcript = match self.transcriber.transcribe(audio).await {
            Ok(text) => text,
            Err(e) => {
                error!("Transcription failed: {}", e);
                String::new()
            }
        };
        info!("User transcript: {:?}", transcript);

        let (ai_text, sonification_data) = if transcript.is_empty() && image.is_none() {
            (NO_SPEECH_MESSAGE.to_string(), Vec::new())
        } else {
            let prompt = build_prompt(&transcript);
            match self.responder.respond(&prompt, image.as_ref()).await {
                Some(reply) => (reply.text, reply.data),
                None => {
                    warn!("All models failed, using fallback answer");
                    (MODEL_UNAVAILABLE_MESSAGE.to_string(), Vec::new())
                }
            }
        };

        let speech_text = clean_for_speech(&ai_text);
        info!("AI response to user: {}", speech_text);

        let audio_base64 = match self.synthesizer.synthesize(&speech_text).await {
            Ok(speech) if !speech.is_empty() => Some(speech.to_base64()),
            Ok(_) => {
                warn!("Synthesis returned no audio");
                None
            }
            Err(e) => {
                error!("Synthesis failed: {}", e);
                None
            }
        };

        BriefResponse {
            user_text: transcript,
            ai_text,
            audio_base64,
            sonification_data,
        }
    }
}
