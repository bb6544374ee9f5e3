//! Spendbot Core Library
//!
//! Shared functionality for the spendbot expense tracker backend:
//! - Expense category enumeration and validated extraction model
//! - Deterministic prompt builder for LLM extraction
//! - Pluggable chat backends (OpenAI, Anthropic, mock)
//! - Resilient extraction engine with retry and tolerant JSON parsing
//! - Expense decision logic mapping extractions to user-facing outcomes
//! - SQLite persistence for users and expenses

pub mod category;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod service;

pub use category::ExpenseCategory;
pub use config::{LlmProvider, Settings};
pub use db::Database;
pub use engine::Extractor;
pub use error::{Error, Result};
pub use extract::Extraction;
pub use llm::{AnthropicBackend, ChatBackend, LlmClient, MockBackend, OpenAiBackend};
pub use models::{Expense, NewExpense, Outcome, User};
pub use service::ExpenseService;
