//! Completion parsing for expense extraction
//!
//! Models are told to answer with JSON only, but often wrap the payload in
//! explanatory prose. Parsing is therefore two explicit passes: a strict parse
//! of the trimmed completion, then a tolerant fallback that slices the first
//! `{` through the last `}` and parses that. Validation failures (unknown
//! category, non-positive amount) surface as errors either way so the caller
//! can retry.

use tracing::warn;

use crate::error::{Error, Result};
use crate::extract::{Extraction, RawExtraction};

/// Parse a completion into a validated extraction.
pub fn parse_extraction(response: &str) -> Result<Extraction> {
    let response = response.trim();

    match serde_json::from_str::<RawExtraction>(response) {
        Ok(raw) => Extraction::from_raw(raw),
        Err(parse_error) => {
            warn!(error = %parse_error, "Strict parse failed, attempting JSON extraction");
            extract_embedded_json(response)
        }
    }
}

/// Tolerant fallback: slice the first `{` through the last `}` and parse that.
fn extract_embedded_json(response: &str) -> Result<Extraction> {
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            let raw: RawExtraction = serde_json::from_str(json_str).map_err(|e| {
                Error::InvalidData(format!(
                    "Invalid JSON from LLM: {} | Raw: {}",
                    e,
                    truncate(json_str)
                ))
            })?;
            Extraction::from_raw(raw)
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in LLM response | Raw: {}",
            truncate(response)
        ))),
    }
}

/// Truncate long responses for error messages
///
/// Cuts at a character boundary so multibyte completion text cannot panic
/// the error path.
fn truncate(text: &str) -> String {
    match text.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
