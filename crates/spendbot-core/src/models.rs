//! Data models for users, expenses, and processing outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::ExpenseCategory;

/// A bot user, keyed by their messaging-platform id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub telegram_id: String,
}

/// A persisted expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    /// Positive amount, rounded to 2 decimals before insertion
    pub amount: f64,
    pub category: ExpenseCategory,
    pub added_at: DateTime<Utc>,
}

/// A new expense to insert
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub user_id: i64,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
}

/// Result of processing one inbound message
///
/// Always produced: every failure path resolves to an unsuccessful outcome
/// with a user-facing message instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    /// Created expense id, present iff success
    pub expense_id: Option<i64>,
}

impl Outcome {
    pub fn success(message: impl Into<String>, expense_id: i64) -> Self {
        Self {
            success: true,
            message: message.into(),
            expense_id: Some(expense_id),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            expense_id: None,
        }
    }
}
