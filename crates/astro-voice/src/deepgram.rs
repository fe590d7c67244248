//! Speech recognition using the Deepgram pre-recorded audio API

use astro_core::DeepgramConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, VoiceError};

/// Transcription result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Transcribed text (empty when nothing was recognized)
    pub text: String,
    /// Confidence of the top alternative (if available)
    pub confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl ListenResponse {
    fn into_transcript(self) -> Transcript {
        self.results
            .and_then(|r| r.channels.into_iter().next())
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|alt| Transcript {
                text: alt.transcript,
                confidence: alt.confidence,
            })
            .unwrap_or_default()
    }
}

/// Deepgram client for speech recognition
pub struct DeepgramClient {
    client: Client,
    config: DeepgramConfig,
}

impl DeepgramClient {
    /// Create a new Deepgram client
    pub fn new(config: &DeepgramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn listen_url(&self) -> String {
        format!("{}/listen", self.config.base_url.trim_end_matches('/'))
    }

    /// Transcribe raw audio bytes.
    ///
    /// The container format (WebM, WAV, ...) is left for the service to detect.
    pub async fn transcribe(&self, audio_data: &[u8]) -> Result<Transcript> {
        info!("Transcribing audio: {} bytes", audio_data.len());
        debug!(
            "Using model: {}, smart_format: {}",
            self.config.model, self.config.smart_format
        );

        let smart_format = self.config.smart_format.to_string();
        let response = self
            .client
            .post(self.listen_url())
            .query(&[
                ("model", self.config.model.as_str()),
                ("smart_format", smart_format.as_str()),
            ])
            .header("Authorization", format!("Token {}", self.config.api_key))
            .header("Content-Type", "audio/*")
            .body(audio_data.to_vec())
            .send()
            .await
            .map_err(|e| VoiceError::ApiError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::RecognitionFailed(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let parsed: ListenResponse = response.json().await.map_err(|e| {
            VoiceError::RecognitionFailed(format!("Failed to parse response: {}", e))
        })?;
        let transcript = parsed.into_transcript();

        info!(
            "Transcription complete: {} characters, confidence: {:?}",
            transcript.text.len(),
            transcript.confidence
        );

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> DeepgramConfig {
        DeepgramConfig {
            api_key: "dg-key".to_string(),
            base_url: server.uri(),
            ..DeepgramConfig::default()
        }
    }

    #[tokio::test]
    async fn test_transcribe_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listen"))
            .and(query_param("model", "nova-2"))
            .and(query_param("smart_format", "true"))
            .and(header("authorization", "Token dg-key"))
            .and(header("content-type", "audio/*"))
            .and(body_bytes(b"RIFF....WAVE".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "metadata": {"request_id": "abc"},
                "results": {"channels": [{"alternatives": [
                    {"transcript": "How far is the Moon?", "confidence": 0.98}
                ]}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeepgramClient::new(&config(&server)).unwrap();
        let transcript = client.transcribe(b"RIFF....WAVE").await.unwrap();

        assert_eq!(transcript.text, "How far is the Moon?");
        assert_eq!(transcript.confidence, Some(0.98));
    }

    #[tokio::test]
    async fn test_transcribe_missing_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "metadata": {}
            })))
            .mount(&server)
            .await;

        let client = DeepgramClient::new(&config(&server)).unwrap();
        let transcript = client.transcribe(b"silence").await.unwrap();
        assert_eq!(transcript, Transcript::default());
    }

    #[tokio::test]
    async fn test_transcribe_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .mount(&server)
            .await;

        let client = DeepgramClient::new(&config(&server)).unwrap();
        let err = client.transcribe(b"audio").await.unwrap_err();
        assert!(matches!(err, VoiceError::RecognitionFailed(msg) if msg.contains("Invalid credentials")));
    }

    #[test]
    fn test_into_transcript_empty_channels() {
        let parsed: ListenResponse =
            serde_json::from_str(r#"{"results": {"channels": []}}"#).unwrap();
        assert!(parsed.into_transcript().text.is_empty());
    }
}
