//! Regex patterns for field extraction and line confidence signals.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date patterns: day-first and year-first, with / or - separators.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b"
    ).unwrap();

    // Currency amounts: $ plus digits with optional thousands separators
    // and an optional decimal portion.
    pub static ref AMOUNT: Regex = Regex::new(
        r"\$\s*\d+(?:,\d{3})*(?:\.\d+)?"
    ).unwrap();

    // A line item carries a currency amount with exactly two decimals.
    pub static ref LINE_ITEM_AMOUNT: Regex = Regex::new(
        r"\$\s*\d+\.\d{2}"
    ).unwrap();

    // Token-level signals for per-line confidence, anchored at the start
    // of the token.
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"^\d{2}/\d{2}"
    ).unwrap();

    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"^\d{1,3}(?:,\d{3})*\.\d{2}"
    ).unwrap();
}
