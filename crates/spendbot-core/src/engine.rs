//! Resilient extraction engine
//!
//! Orchestrates prompt rendering, the chat-backend call, and completion
//! parsing inside a bounded retry envelope: up to 3 total attempts with
//! exponential backoff (2s, 4s, capped at 10s) between them. Provider errors
//! and parse failures are retried alike; when attempts are exhausted the last
//! error propagates to the caller, which owns the final fallback messaging.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::Extraction;
use crate::llm::{parsing::parse_extraction, ChatBackend, LlmClient};
use crate::prompt::extraction_prompt;

/// Total attempts: 1 initial + 2 retries
const MAX_ATTEMPTS: u32 = 3;
/// First backoff delay in seconds; doubles per retry
const BACKOFF_BASE_SECS: u64 = 2;
/// Backoff ceiling in seconds
const BACKOFF_MAX_SECS: u64 = 10;

/// Extraction engine over a shared chat client
#[derive(Clone)]
pub struct Extractor {
    client: LlmClient,
}

impl Extractor {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Extract expense information from one message.
    ///
    /// Returns the last error once all attempts are exhausted; this is the
    /// one path where the engine does not absorb a failure itself.
    pub async fn extract(&self, message: &str) -> Result<Extraction> {
        let prompt = extraction_prompt(message);

        let mut attempt = 1;
        loop {
            match self.attempt(&prompt).await {
                Ok(extraction) => {
                    info!(
                        attempt,
                        is_expense = extraction.is_expense,
                        category = ?extraction.category,
                        amount = ?extraction.amount,
                        "Extraction succeeded"
                    );
                    return Ok(extraction);
                }
                Err(e) if attempt < MAX_ATTEMPTS => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        attempt,
                        error = %e,
                        delay_secs = delay.as_secs(),
                        "Extraction attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Extraction failed, attempts exhausted");
                    return Err(e);
                }
            }
        }
    }

    /// One attempt: call the backend and parse the completion
    async fn attempt(&self, prompt: &str) -> Result<Extraction> {
        let response = self.client.complete(prompt).await?;
        debug!(model = %self.client.model(), response = %response, "Raw LLM response");
        parse_extraction(&response)
    }
}

/// Delay before the retry following attempt `attempt` (1-based)
fn backoff_delay(attempt: u32) -> Duration {
    let secs = BACKOFF_BASE_SECS
        .saturating_mul(1 << (attempt - 1))
        .min(BACKOFF_MAX_SECS);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ExpenseCategory;
    use crate::llm::{MockBackend, MockReply};

    const PIZZA_JSON: &str =
        r#"{"is_expense": true, "description": "Pizza", "amount": 20.0, "category": "Food"}"#;

    fn extractor(mock: MockBackend) -> Extractor {
        Extractor::new(LlmClient::mock(mock))
    }

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(3), Duration::from_secs(8));
        assert_eq!(backoff_delay(4), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_extract_success_first_attempt() {
        let mock = MockBackend::returning(PIZZA_JSON);
        let extraction = extractor(mock.clone()).extract("Pizza 20 reais").await.unwrap();

        assert!(extraction.is_expense);
        assert_eq!(extraction.category, Some(ExpenseCategory::Food));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_succeeds_on_third_attempt() {
        let mock = MockBackend::scripted(vec![
            MockReply::Fail("connection reset".into()),
            MockReply::Fail("connection reset".into()),
            MockReply::Text(PIZZA_JSON.into()),
        ]);

        let extraction = extractor(mock.clone()).extract("Pizza 20 reais").await.unwrap();
        assert_eq!(extraction.amount, Some(20.0));
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_exhausts_after_three_attempts() {
        let mock = MockBackend::scripted(vec![
            MockReply::Fail("down".into()),
            MockReply::Fail("down".into()),
            MockReply::Fail("down".into()),
            // A 4th reply that must never be consumed
            MockReply::Text(PIZZA_JSON.into()),
        ]);

        let result = extractor(mock.clone()).extract("Pizza 20 reais").await;
        assert!(result.is_err());
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_failures_are_retried() {
        let mock = MockBackend::scripted(vec![
            MockReply::Text("I cannot answer that.".into()),
            MockReply::Text(format!("Sure! {} Anything else?", PIZZA_JSON)),
        ]);

        let extraction = extractor(mock.clone()).extract("Pizza 20 reais").await.unwrap();
        assert_eq!(extraction.description.as_deref(), Some("Pizza"));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_amount_counts_as_failed_attempt() {
        let bad = r#"{"is_expense": true, "description": "x", "amount": -5, "category": "Other"}"#;
        let mock = MockBackend::scripted(vec![
            MockReply::Text(bad.into()),
            MockReply::Text(PIZZA_JSON.into()),
        ]);

        let extraction = extractor(mock.clone()).extract("Pizza 20 reais").await.unwrap();
        assert_eq!(extraction.amount, Some(20.0));
        assert_eq!(mock.calls(), 2);
    }
}
