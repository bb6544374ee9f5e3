//! Validated extraction model
//!
//! `Extraction` is the shape the LLM must produce for one message. It is only
//! built through [`Extraction::from_raw`], which coerces and validates the raw
//! completion fields: the amount may arrive as a JSON number or a string
//! numeral, must be strictly positive, and is rounded to 2 decimals exactly
//! once here. Downstream code never re-rounds.

use serde::{Deserialize, Serialize};

use crate::category::ExpenseCategory;
use crate::error::{Error, Result};

/// Raw completion schema as deserialized from the model response
///
/// Tolerates the amount arriving as `20.5` or `"20.5"`; everything else about
/// the field typing is strict (unknown categories fail deserialization).
#[derive(Debug, Clone, Deserialize)]
pub struct RawExtraction {
    pub is_expense: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

/// Amount as produced by the model, before coercion
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn as_f64(&self) -> Result<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::InvalidData(format!("Amount is not a number: {:?}", s))
            }),
        }
    }
}

/// Validated result of extracting one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub is_expense: bool,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
}

impl Extraction {
    /// Validate a raw completion into an extraction.
    ///
    /// The amount, when present, must be strictly greater than zero and is
    /// rounded half-up to 2 decimals. Zero and negative amounts are rejected
    /// rather than floored.
    pub fn from_raw(raw: RawExtraction) -> Result<Self> {
        let amount = match raw.amount {
            Some(raw_amount) => {
                let value = raw_amount.as_f64()?;
                // NaN and infinity sneak past a plain <= 0.0 check via the
                // string-coercion path
                if !value.is_finite() || value <= 0.0 {
                    return Err(Error::InvalidData(format!(
                        "Amount must be positive, got {}",
                        value
                    )));
                }
                Some(round_amount(value))
            }
            None => None,
        };

        Ok(Self {
            is_expense: raw.is_expense,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            amount,
            category: raw.category,
        })
    }

    /// True when description, amount, and category are all present
    pub fn is_complete(&self) -> bool {
        self.description.is_some() && self.amount.is_some() && self.category.is_some()
    }
}

/// Round to 2 decimals, half-up.
///
/// `f64::round` is half-away-from-zero, which is half-up for the positive
/// amounts that pass validation (20.999 -> 21.00).
pub fn round_amount(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawExtraction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_complete_extraction() {
        let extraction = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Pizza", "amount": 20.0, "category": "Food"}"#,
        ))
        .unwrap();
        assert!(extraction.is_expense);
        assert!(extraction.is_complete());
        assert_eq!(extraction.amount, Some(20.0));
        assert_eq!(extraction.category, Some(ExpenseCategory::Food));
    }

    #[test]
    fn test_non_expense_with_null_fields() {
        let extraction = Extraction::from_raw(raw(
            r#"{"is_expense": false, "description": null, "amount": null, "category": null}"#,
        ))
        .unwrap();
        assert!(!extraction.is_expense);
        assert!(!extraction.is_complete());
    }

    #[test]
    fn test_missing_optional_fields_default_to_none() {
        let extraction = Extraction::from_raw(raw(r#"{"is_expense": false}"#)).unwrap();
        assert_eq!(extraction.description, None);
        assert_eq!(extraction.amount, None);
        assert_eq!(extraction.category, None);
    }

    #[test]
    fn test_string_amount_coerced() {
        let extraction = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Bus", "amount": "4.50", "category": "Transportation"}"#,
        ))
        .unwrap();
        assert_eq!(extraction.amount, Some(4.50));
    }

    #[test]
    fn test_non_numeric_string_amount_rejected() {
        let result = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Bus", "amount": "a lot", "category": "Transportation"}"#,
        ));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let result = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Free", "amount": 0, "category": "Other"}"#,
        ));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_nan_amount_rejected() {
        let result = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Mystery", "amount": "NaN", "category": "Other"}"#,
        ));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_infinite_amount_rejected() {
        for amount in ["inf", "infinity", "-inf"] {
            let json = format!(
                r#"{{"is_expense": true, "description": "Big", "amount": "{}", "category": "Other"}}"#,
                amount
            );
            let result = Extraction::from_raw(raw(&json));
            assert!(matches!(result, Err(Error::InvalidData(_))), "{}", amount);
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Refund", "amount": -5, "category": "Other"}"#,
        ));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_amount_rounded_half_up_once() {
        let extraction = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "Dinner", "amount": 20.999, "category": "Food"}"#,
        ))
        .unwrap();
        assert_eq!(extraction.amount, Some(21.00));

        assert_eq!(round_amount(20.999), 21.00);
        assert_eq!(round_amount(3.14159), 3.14);
    }

    #[test]
    fn test_blank_description_treated_as_missing() {
        let extraction = Extraction::from_raw(raw(
            r#"{"is_expense": true, "description": "   ", "amount": 5, "category": "Food"}"#,
        ))
        .unwrap();
        assert_eq!(extraction.description, None);
        assert!(!extraction.is_complete());
    }

    #[test]
    fn test_invalid_category_fails_deserialization() {
        let result: std::result::Result<RawExtraction, _> = serde_json::from_str(
            r#"{"is_expense": true, "description": "Pizza", "amount": 20, "category": "Junk"}"#,
        );
        assert!(result.is_err());
    }
}
