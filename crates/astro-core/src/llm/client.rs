//! Gemini API HTTP client

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

use super::reply::{ModelReply, parse_reply};
use super::types::*;

/// Generative language client with ordered model fallback
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    models: Vec<String>,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            models: config.models.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Models in the order they are tried
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Call `generateContent` on one model and return the reply text
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!(
            "Sending request to Gemini API: model={}, image={}",
            model,
            image.is_some()
        );

        let request = GenerateContentRequest::user(prompt, image);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            return Err(Error::GeminiApi(format!("{}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            Error::GeminiApi(format!("Failed to parse response: {} - {}", e, body))
        })?;

        let text = parsed.text().ok_or_else(|| {
            Error::GeminiApi(format!("No text in response (model {}): {}", model, body))
        })?;

        info!("Gemini response from {}: {} chars", model, text.len());

        Ok(text)
    }

    /// Try each configured model in order until one yields a non-empty reply
    pub async fn generate_with_fallback(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Option<ModelReply> {
        for model in &self.models {
            let reply = match self.generate(model, prompt, image).await {
                Ok(raw) => parse_reply(&raw),
                Err(e) => Err(e),
            };

            match reply {
                Ok(reply) if !reply.text.is_empty() => return Some(reply),
                Ok(_) => warn!("Gemini model {} returned an empty reply", model),
                Err(e) => warn!("Gemini error ({}): {}", model, e),
            }
        }

        None
    }
}
