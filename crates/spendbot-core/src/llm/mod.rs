//! Chat-completion backend abstraction
//!
//! One capability: given a rendered prompt, return completion text. Backends
//! are selected once at configuration load via the model-name substring rule
//! (`LlmProvider::for_model`) and validated at construction - a selected
//! provider without its API credential fails with `Error::Config` before any
//! call is made.
//!
//! # Architecture
//!
//! - `ChatBackend` trait: the completion interface
//! - `LlmClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAiBackend`, `AnthropicBackend`, `MockBackend`

mod anthropic;
mod mock;
mod openai;
pub mod parsing;

pub use anthropic::AnthropicBackend;
pub use mock::{MockBackend, MockReply};
pub use openai::OpenAiBackend;

use async_trait::async_trait;

use crate::config::{LlmProvider, Settings};
use crate::error::{Error, Result};

/// Per-call network timeout so a hung provider cannot stall a task
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait defining the chat-completion interface for all backends
///
/// Backends are Send + Sync so one client can be shared across request tasks;
/// they hold no per-call mutable state.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// The model name (for logging)
    fn model(&self) -> &str;
}

/// Concrete chat client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum LlmClient {
    /// OpenAI chat completions API
    OpenAi(OpenAiBackend),
    /// Anthropic messages API
    Anthropic(AnthropicBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl LlmClient {
    /// Build the client the settings select.
    ///
    /// Fails with `Error::Config` when the selected provider's credential is
    /// absent. This is the only unrecoverable error in the service; callers
    /// surface it at startup rather than per message.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.llm_provider() {
            LlmProvider::OpenAi => {
                let api_key = settings.openai_api_key.as_deref().ok_or_else(|| {
                    Error::Config("OpenAI API key is required but not configured".into())
                })?;
                Ok(Self::OpenAi(OpenAiBackend::new(&settings.llm_model, api_key)))
            }
            LlmProvider::Anthropic => {
                let api_key = settings.anthropic_api_key.as_deref().ok_or_else(|| {
                    Error::Config("Anthropic API key is required but not configured".into())
                })?;
                Ok(Self::Anthropic(AnthropicBackend::new(
                    &settings.llm_model,
                    api_key,
                )))
            }
        }
    }

    /// Create a mock client for testing
    pub fn mock(backend: MockBackend) -> Self {
        Self::Mock(backend)
    }

    /// Whether the selected provider's credential is present.
    ///
    /// Used for health reporting only; construction already fails fast
    /// without a credential.
    pub fn is_configured(settings: &Settings) -> bool {
        match settings.llm_provider() {
            LlmProvider::OpenAi => settings.openai_api_key.is_some(),
            LlmProvider::Anthropic => settings.anthropic_api_key.is_some(),
        }
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            Self::OpenAi(b) => b.complete(prompt).await,
            Self::Anthropic(b) => b.complete(prompt).await,
            Self::Mock(b) => b.complete(prompt).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::OpenAi(b) => b.model(),
            Self::Anthropic(b) => b.model(),
            Self::Mock(b) => b.model(),
        }
    }
}
