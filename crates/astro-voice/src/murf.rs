//! Text-to-Speech synthesis using the Murf streaming API

use astro_core::MurfConfig;
use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, VoiceError};

/// Streaming synthesis request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamRequest<'a> {
    voice_id: &'a str,
    text: &'a str,
    format: &'a str,
    model: &'a str,
}

/// TTS synthesis result
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Audio data (encoded in the requested format)
    pub audio_data: Vec<u8>,
    /// Content type reported by the service
    pub content_type: String,
}

impl SynthesisResult {
    /// Whether the service streamed any audio at all
    pub fn is_empty(&self) -> bool {
        self.audio_data.is_empty()
    }

    /// Get audio data as base64
    pub fn to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.audio_data)
    }
}

/// Murf client for speech synthesis
pub struct MurfClient {
    client: Client,
    config: MurfConfig,
}

impl MurfClient {
    /// Create a new Murf client
    pub fn new(config: &MurfConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Synthesize speech, collecting the streamed audio into one buffer
    pub async fn synthesize(&self, text: &str) -> Result<SynthesisResult> {
        info!("Synthesizing speech: {} chars using Murf", text.len());
        debug!(
            "Voice: {}, Model: {}, Format: {}",
            self.config.voice_id, self.config.model, self.config.format
        );

        let body = StreamRequest {
            voice_id: &self.config.voice_id,
            text,
            format: &self.config.format,
            model: &self.config.model,
        };

        let response = self
            .client
            .post(&self.config.stream_url)
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::ApiError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::SynthesisFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let mut audio_data = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                VoiceError::SynthesisFailed(format!("Failed to read audio stream: {}", e))
            })?;
            audio_data.extend_from_slice(&chunk);
        }

        info!(
            "Synthesis complete: {} bytes, content-type: {}",
            audio_data.len(),
            content_type
        );

        Ok(SynthesisResult {
            audio_data,
            content_type,
        })
    }
}
