//! Service configuration
//!
//! Settings are loaded once from environment variables at startup and passed
//! explicitly to the components that need them. Provider selection is resolved
//! here, at load time, so the rest of the code only sees a tagged variant.
//!
//! Environment variables:
//! - `SPENDBOT_DB`: Database file path (default: spendbot.db)
//! - `SPENDBOT_HOST` / `SPENDBOT_PORT`: Bind address (default: 0.0.0.0:8000)
//! - `LLM_MODEL`: Model name, drives provider selection (default: gpt-4)
//! - `OPENAI_API_KEY`: Required when the OpenAI provider is selected
//! - `ANTHROPIC_API_KEY`: Required when the Anthropic provider is selected

/// LLM provider, resolved once from the configured model name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    /// Select a provider from a model name.
    ///
    /// Models containing "gpt" map to OpenAI, models containing "claude" map
    /// to Anthropic. Anything else defaults to OpenAI.
    pub fn for_model(model: &str) -> Self {
        let model = model.to_lowercase();
        if model.contains("gpt") {
            Self::OpenAi
        } else if model.contains("claude") {
            Self::Anthropic
        } else {
            // Unknown model names default to OpenAI
            Self::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Database file path
    pub database_path: String,
    /// Host to bind the service to
    pub host: String,
    /// Port to bind the service to
    pub port: u16,
    /// LLM model name (gpt-4, gpt-3.5-turbo, claude-3-sonnet-20240229, ...)
    pub llm_model: String,
    /// OpenAI API key, required for GPT models
    pub openai_api_key: Option<String>,
    /// Anthropic API key, required for Claude models
    pub anthropic_api_key: Option<String>,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("SPENDBOT_DB")
                .unwrap_or_else(|_| "spendbot.db".to_string()),
            host: std::env::var("SPENDBOT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SPENDBOT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }

    /// Provider derived from the configured model name
    pub fn llm_provider(&self) -> LlmProvider {
        LlmProvider::for_model(&self.llm_model)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: "spendbot.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            llm_model: "gpt-4".to_string(),
            openai_api_key: None,
            anthropic_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_gpt_models() {
        assert_eq!(LlmProvider::for_model("gpt-4"), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::for_model("gpt-3.5-turbo"), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::for_model("GPT-4o"), LlmProvider::OpenAi);
    }

    #[test]
    fn test_provider_for_claude_models() {
        assert_eq!(
            LlmProvider::for_model("claude-3-sonnet-20240229"),
            LlmProvider::Anthropic
        );
        assert_eq!(
            LlmProvider::for_model("Claude-3-Haiku"),
            LlmProvider::Anthropic
        );
    }

    #[test]
    fn test_provider_defaults_to_openai() {
        assert_eq!(LlmProvider::for_model("llama3.2"), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::for_model(""), LlmProvider::OpenAi);
    }

    #[test]
    fn test_settings_provider_resolution() {
        let settings = Settings {
            llm_model: "claude-3-opus".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.llm_provider(), LlmProvider::Anthropic);
    }
}
