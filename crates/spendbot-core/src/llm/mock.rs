//! Mock backend for testing
//!
//! Returns scripted replies in order, so tests can exercise the retry
//! envelope (fail, fail, succeed) and the decision logic without a live
//! provider. When the script runs out, the last configured default reply is
//! repeated.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::ChatBackend;

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this completion text
    Text(String),
    /// Fail the call with a provider error
    Fail(String),
}

/// Mock chat backend with a scripted reply queue
#[derive(Clone, Default)]
pub struct MockBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    default_reply: Arc<Mutex<Option<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a mock that always returns the given completion
    pub fn returning(text: impl Into<String>) -> Self {
        let mock = Self::default();
        *mock.default_reply.lock().unwrap() = Some(text.into());
        mock
    }

    /// Create a mock that plays the given replies in order
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        let mock = Self::default();
        *mock.replies.lock().unwrap() = replies.into();
        mock
    }

    /// Number of completion calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return match reply {
                MockReply::Text(text) => Ok(text),
                MockReply::Fail(message) => Err(Error::Provider(message)),
            };
        }

        self.default_reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Provider("Mock backend has no reply configured".into()))
    }

    fn model(&self) -> &str {
        "mock"
    }
}
