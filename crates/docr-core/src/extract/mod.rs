//! Pattern-based field extraction over a page's text.
//!
//! Four independent routines derive vendor, dates, amounts and line items
//! from recognized text. Matches are accepted syntactically with no
//! semantic validation (a date is not checked against the calendar); this
//! keeps extraction high-recall on noisy OCR text.

pub mod patterns;
mod vendor;

pub use vendor::OrgRecognizer;

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::models::record::{DocumentFields, LineItem};
use patterns::{AMOUNT, DATE_DMY, DATE_YMD, LINE_ITEM_AMOUNT};

/// Field extractor with an optional injected organization recognizer.
pub struct FieldExtractor {
    recognizer: Option<Arc<dyn OrgRecognizer>>,
    vendor_scan_chars: usize,
}

impl FieldExtractor {
    /// Extractor without a recognizer; vendor extraction falls back to
    /// the first line of text.
    pub fn new() -> Self {
        Self {
            recognizer: None,
            vendor_scan_chars: 1000,
        }
    }

    /// Attach an organization recognizer.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn OrgRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Override how many characters of text the recognizer sees.
    pub fn with_vendor_scan_chars(mut self, chars: usize) -> Self {
        self.vendor_scan_chars = chars;
        self
    }

    /// Run all extraction routines over one page's text.
    pub fn extract(&self, text: &str) -> DocumentFields {
        DocumentFields {
            vendor: vendor::extract_vendor(self.recognizer.as_deref(), text, self.vendor_scan_chars),
            dates: extract_dates(text),
            amounts: extract_amounts(text),
            line_items: extract_line_items(text),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// All date-like strings: day-first matches first, then year-first
/// matches, each group in match order.
///
/// Duplicates are preserved and matches are not checked for calendar
/// validity.
pub fn extract_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    for pattern in [&*DATE_DMY, &*DATE_YMD] {
        dates.extend(pattern.find_iter(text).map(|m| m.as_str().to_string()));
    }
    dates
}

/// All `$`-prefixed amounts parsed as decimals, in match order.
///
/// `$`, spaces and thousands separators are stripped before parsing; a
/// match that still fails to parse is silently dropped.
pub fn extract_amounts(text: &str) -> Vec<Decimal> {
    AMOUNT
        .find_iter(text)
        .filter_map(|m| {
            let cleaned = m.as_str().replace(['$', ',', ' '], "");
            Decimal::from_str(&cleaned).ok()
        })
        .collect()
}

/// Lines containing a two-decimal currency amount become line items; the
/// whole trimmed line is the description.
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    text.lines()
        .filter(|line| LINE_ITEM_AMOUNT.is_match(line))
        .map(|line| LineItem {
            description: line.trim().to_string(),
        })
        .collect()
}
