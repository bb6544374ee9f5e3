//! Expense decision logic
//!
//! `process_message` interprets an extraction against the business rules and
//! always resolves to an [`Outcome`]: engine failures, non-expense messages,
//! incomplete extractions, and persistence failures all map to unsuccessful
//! outcomes with user-facing text instead of surfacing as errors.

use tracing::{error, info, warn};

use crate::db::Database;
use crate::engine::Extractor;
use crate::models::{NewExpense, Outcome};

const NOT_AN_EXPENSE_MSG: &str =
    "This doesn't look like an expense. Try something like: 'Pizza 20 reais'";
const INCOMPLETE_MSG: &str =
    "Could not extract all expense details. Please provide description, amount, and try again.";
const GENERIC_ERROR_MSG: &str =
    "Sorry, there was an error processing your expense. Please try again.";

/// Maximum description length persisted with an expense
const MAX_DESCRIPTION_LEN: usize = 500;

/// Service for processing and storing expenses
#[derive(Clone)]
pub struct ExpenseService {
    extractor: Extractor,
    db: Database,
}

impl ExpenseService {
    pub fn new(extractor: Extractor, db: Database) -> Self {
        Self { extractor, db }
    }

    /// Process one user message into an outcome. Never fails.
    pub async fn process_message(&self, user_id: i64, message: &str) -> Outcome {
        let extraction = match self.extractor.extract(message).await {
            Ok(extraction) => extraction,
            Err(e) => {
                error!(user_id, error = %e, "Error extracting expense from message");
                return Outcome::failure(GENERIC_ERROR_MSG);
            }
        };

        if !extraction.is_expense {
            info!(user_id, "Message is not an expense");
            return Outcome::failure(NOT_AN_EXPENSE_MSG);
        }

        // All three fields are required before anything is persisted
        let (description, amount, category) = match (
            extraction.description,
            extraction.amount,
            extraction.category,
        ) {
            (Some(d), Some(a), Some(c)) => (d, a, c),
            _ => {
                warn!(user_id, "Incomplete extraction");
                return Outcome::failure(INCOMPLETE_MSG);
            }
        };

        if description.chars().count() > MAX_DESCRIPTION_LEN {
            error!(
                user_id,
                len = description.chars().count(),
                "Extracted description exceeds the storage limit"
            );
            return Outcome::failure(GENERIC_ERROR_MSG);
        }

        let new_expense = NewExpense {
            user_id,
            description,
            amount,
            category,
        };

        match self.db.create_expense(&new_expense) {
            Ok(expense) => {
                info!(
                    user_id,
                    expense_id = expense.id,
                    category = %expense.category,
                    amount = expense.amount,
                    "Created expense"
                );
                Outcome::success(format!("{} expense added ✅", expense.category), expense.id)
            }
            Err(e) => {
                error!(user_id, error = %e, "Failed to persist expense");
                Outcome::failure(GENERIC_ERROR_MSG)
            }
        }
    }
}
