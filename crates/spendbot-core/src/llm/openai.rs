//! OpenAI chat completions backend
//!
//! Talks to the OpenAI `/v1/chat/completions` API with Bearer auth.
//! Temperature is fixed at 0.0 so classification is reproducible.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{ChatBackend, REQUEST_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI backend
#[derive(Clone)]
pub struct OpenAiBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend
    pub fn new(model: &str, api_key: &str) -> Self {
        Self::with_base_url(model, api_key, DEFAULT_BASE_URL)
    }

    /// Create a backend against a custom base URL (for tests and proxies)
    pub fn with_base_url(model: &str, api_key: &str, base_url: &str) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.0,
        };

        debug!(model = %self.model, "Sending chat completion request to OpenAI");

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "OpenAI API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Provider("No choices in OpenAI response".into()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
