//! Local model API client
//!
//! Talks to an Ollama-compatible endpoint on the local machine. Two models are
//! involved: a text model for summaries, filenames and categories, and a
//! vision model for image descriptions (images travel base64-encoded in the
//! request body). The client is injected wherever inference is needed so tests
//! can substitute a fake.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ModelConfig;
use crate::error::{OrganizeError, Result};

/// Boundary to the generative model
///
/// The pipeline treats these as blocking synchronous calls with no timeout of
/// its own; a hung model call blocks the whole run.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run the text model on a prompt and return its raw completion text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Run the vision model on a prompt plus one image
    async fn describe_image(&self, prompt: &str, image: &[u8]) -> Result<String>;
}

/// Request body for `/api/generate`
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

/// Response body for `/api/generate` (non-streaming)
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama-backed inference client
pub struct OllamaClient {
    client: Client,
    host: String,
    text_model: String,
    vision_model: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| OrganizeError::Inference(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
        })
    }

    async fn generate(&self, model: &str, prompt: &str, images: Option<Vec<String>>) -> Result<String> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            images,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await
            .map_err(|e| OrganizeError::Inference(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrganizeError::Inference(format!(
                "model endpoint returned {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OrganizeError::Decode(e.to_string()))?;

        Ok(parsed.response.trim().to_string())
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(&self.text_model, prompt, None).await
    }

    async fn describe_image(&self, prompt: &str, image: &[u8]) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        self.generate(&self.vision_model, prompt, Some(vec![encoded]))
            .await
    }
}
