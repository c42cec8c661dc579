//! Document record models shared across the pipeline and persisted as JSON.
//!
//! Field names and nesting of [`DocumentResult`] are a compatibility
//! contract for downstream consumers that persist or re-read results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One grouped text line with its confidence signals.
///
/// `conf_date` and `conf_amount` carry 0 when no matching token was found
/// on the line; see [`crate::pipeline::Line`] for the nullable in-process
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Space-joined token texts in reading order.
    pub text: String,

    /// Confidence of the first date-like token in the line.
    pub conf_date: i64,

    /// Confidence of the first amount-like token in the line.
    pub conf_amount: i64,
}

/// A single extracted line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The full trimmed text line containing a currency amount.
    pub description: String,
}

/// Structured fields extracted from one page or one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    /// Vendor name (empty when nothing was recognized).
    pub vendor: String,

    /// Date-like strings in match order, duplicates preserved.
    pub dates: Vec<String>,

    /// Monetary amounts in match order.
    pub amounts: Vec<Decimal>,

    /// Lines that carry a currency amount.
    pub line_items: Vec<LineItem>,
}

/// Output for a single processed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Raw engine text for the page, newline-separated.
    pub text: String,

    /// Grouped lines with confidence signals.
    pub lines: Vec<LineRecord>,

    /// Extracted fields.
    pub fields: DocumentFields,

    /// Mean token confidence, rounded to 2 decimals (0.0 with no samples).
    pub confidence: f64,
}

/// Final merged output for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// All page texts joined by newline, in page order.
    pub text: String,

    /// Non-empty trimmed lines of `text`.
    pub pretty_text: Vec<String>,

    /// Merged fields (vendor taken from the first page only).
    pub fields: DocumentFields,

    /// All pages' lines, page order preserved.
    pub lines: Vec<LineRecord>,

    /// Mean of per-page confidences, rounded to 2 decimals.
    pub confidence: f64,

    /// Source file path.
    pub file_path: String,

    /// Number of processed pages.
    pub total_pages: usize,
}

/// Outcome of routing one file through the processor.
///
/// Unsupported or unreadable inputs are carried as a result object rather
/// than an error so batch drivers can log and continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    /// The document was processed.
    Completed(DocumentResult),

    /// The file was rejected before processing.
    Rejected(ProcessFailure),
}

/// A rejected file with the reason it could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFailure {
    /// Source file path.
    pub file_path: String,

    /// Human-readable rejection reason.
    pub error: String,
}

impl ProcessOutcome {
    /// The document result, if processing completed.
    pub fn document(&self) -> Option<&DocumentResult> {
        match self {
            ProcessOutcome::Completed(doc) => Some(doc),
            ProcessOutcome::Rejected(_) => None,
        }
    }

    /// True when the file was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ProcessOutcome::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_document() -> DocumentResult {
        DocumentResult {
            text: "Acme Corp\nTotal $45.00 due".to_string(),
            pretty_text: vec!["Acme Corp".to_string(), "Total $45.00 due".to_string()],
            fields: DocumentFields {
                vendor: "Acme Corp".to_string(),
                dates: vec!["04/07/2025".to_string()],
                amounts: vec![Decimal::from_str("45.00").unwrap()],
                line_items: vec![LineItem {
                    description: "Total $45.00 due".to_string(),
                }],
            },
            lines: vec![LineRecord {
                text: "Total $45.00 due".to_string(),
                conf_date: 0,
                conf_amount: 91,
            }],
            confidence: 88.5,
            file_path: "invoice.pdf".to_string(),
            total_pages: 1,
        }
    }

    #[test]
    fn test_document_json_contract() {
        let value = serde_json::to_value(sample_document()).unwrap();

        for key in [
            "text",
            "pretty_text",
            "fields",
            "lines",
            "confidence",
            "file_path",
            "total_pages",
        ] {
            assert!(value.get(key).is_some(), "missing top-level key {key}");
        }

        let fields = value.get("fields").unwrap();
        for key in ["vendor", "dates", "amounts", "line_items"] {
            assert!(fields.get(key).is_some(), "missing fields key {key}");
        }

        let line = &value.get("lines").unwrap()[0];
        assert!(line.get("text").is_some());
        assert_eq!(line.get("conf_date").unwrap(), 0);
        assert_eq!(line.get("conf_amount").unwrap(), 91);

        // Amounts serialize as JSON numbers, not strings.
        assert!(fields.get("amounts").unwrap()[0].is_number());
    }

    #[test]
    fn test_outcome_serializes_untagged() {
        let rejected = ProcessOutcome::Rejected(ProcessFailure {
            file_path: "notes.docx".to_string(),
            error: "unsupported file type: .docx".to_string(),
        });

        let value = serde_json::to_value(&rejected).unwrap();
        assert_eq!(value.get("file_path").unwrap(), "notes.docx");
        assert!(value.get("error").is_some());
        assert!(value.get("text").is_none());
        assert!(rejected.is_rejected());
        assert!(rejected.document().is_none());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: DocumentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
