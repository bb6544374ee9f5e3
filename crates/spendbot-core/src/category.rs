//! Expense category enumeration
//!
//! Fixed closed set of categories the LLM may assign. The serde labels are the
//! exact strings expected in completions and stored in the database; anything
//! else fails deserialization and counts as a parse failure upstream.

use serde::{Deserialize, Serialize};

/// Valid expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    #[serde(rename = "Medical/Healthcare")]
    MedicalHealthcare,
    Savings,
    Debt,
    Education,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// All categories in prompt order
    pub const ALL: [ExpenseCategory; 11] = [
        Self::Housing,
        Self::Transportation,
        Self::Food,
        Self::Utilities,
        Self::Insurance,
        Self::MedicalHealthcare,
        Self::Savings,
        Self::Debt,
        Self::Education,
        Self::Entertainment,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::MedicalHealthcare => "Medical/Healthcare",
            Self::Savings => "Savings",
            Self::Debt => "Debt",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Comma-separated label list for prompt rendering
    pub fn prompt_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
