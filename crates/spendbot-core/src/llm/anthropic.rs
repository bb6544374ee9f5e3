//! Anthropic messages backend
//!
//! Talks to the Anthropic `/v1/messages` API. Authentication uses the
//! `x-api-key` header plus the required `anthropic-version` header; the
//! response carries content blocks whose text parts are joined into the
//! completion. Temperature is fixed at 0.0.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{ChatBackend, REQUEST_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Anthropic backend
#[derive(Clone)]
pub struct AnthropicBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend
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
impl ChatBackend for AnthropicBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(model = %self.model, "Sending messages request to Anthropic");

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Anthropic API error {}: {}",
                status, body
            )));
        }

        let messages_response: MessagesResponse = response.json().await?;

        messages_response
            .text()
            .ok_or_else(|| Error::Provider("No text in Anthropic response".into()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Anthropic messages API request
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic messages API response
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Content block; only text blocks carry completion output
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Join all text blocks into the completion text
    fn text(&self) -> Option<String> {
        let texts: Vec<_> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_new() {
        let backend = AnthropicBackend::new("claude-3-sonnet-20240229", "sk-ant-test");
        assert_eq!(backend.model(), "claude-3-sonnet-20240229");
        assert_eq!(backend.host(), "https://api.anthropic.com");
    }

    #[test]
    fn test_request_serialization() {
        let request = MessagesRequest {
            model: "claude-3-haiku".to_string(),
            max_tokens: MAX_TOKENS,
            temperature: 0.0,
            messages: vec![Message {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_response_text_joins_blocks() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "{\"is_expense\":"},
                {"type": "text", "text": "false}"}
            ]
        }"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "{\"is_expense\":\nfalse}");
    }

    #[test]
    fn test_response_without_text_is_none() {
        let json = r#"{"content": []}"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }
}
