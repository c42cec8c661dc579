//! Token-to-line grouping with per-line confidence signals.

use std::collections::HashMap;

use crate::extract::patterns::{AMOUNT_TOKEN, DATE_TOKEN};
use crate::models::record::LineRecord;
use crate::ocr::OcrData;

/// The engine's "no confidence assigned" marker.
const CONFIDENCE_SENTINEL: &str = "-1";

/// An ordered group of tokens sharing one (block, paragraph, line) key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Space-joined token texts in arrival order.
    pub text: String,

    /// Confidence of the first date-shaped token, if any.
    pub date_confidence: Option<i64>,

    /// Confidence of the first amount-shaped token, if any.
    pub amount_confidence: Option<i64>,
}

impl Line {
    /// Wire form, with unset confidences defaulting to 0.
    pub fn to_record(&self) -> LineRecord {
        LineRecord {
            text: self.text.clone(),
            conf_date: self.date_confidence.unwrap_or(0),
            conf_amount: self.amount_confidence.unwrap_or(0),
        }
    }
}

/// Group flat token arrays into lines keyed by (block, paragraph, line).
///
/// Tokens are visited in the engine's index order and buckets are emitted
/// in first-seen key order; nothing is re-sorted by position, which keeps
/// the engine's natural reading order. A token is dropped entirely when
/// its trimmed text is empty, its confidence is the `-1` sentinel, or its
/// confidence does not parse as an integer.
pub fn group_lines(data: &OcrData) -> Vec<Line> {
    let mut order: Vec<(u32, u32, u32)> = Vec::new();
    let mut buckets: HashMap<(u32, u32, u32), Vec<(String, i64)>> = HashMap::new();

    for i in 0..data.len() {
        let word = data.text[i].trim();
        let conf_raw = data.conf[i].trim();

        if word.is_empty() || conf_raw == CONFIDENCE_SENTINEL {
            continue;
        }
        let Ok(conf) = conf_raw.parse::<i64>() else {
            continue;
        };

        let key = (data.block_num[i], data.par_num[i], data.line_num[i]);
        buckets
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push((word.to_string(), conf));
    }

    order
        .into_iter()
        .map(|key| summarize_bucket(&buckets[&key]))
        .collect()
}

/// Join a bucket's words and scan for its confidence signals.
///
/// The first date-shaped token sets `date_confidence`; a token is only
/// tested against the amount pattern when the date pattern did not match
/// it. Later matches never overwrite an earlier one.
fn summarize_bucket(words: &[(String, i64)]) -> Line {
    let text = words
        .iter()
        .map(|(word, _)| word.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut date_confidence = None;
    let mut amount_confidence = None;

    for (word, conf) in words {
        if DATE_TOKEN.is_match(word) {
            if date_confidence.is_none() {
                date_confidence = Some(*conf);
            }
        } else if AMOUNT_TOKEN.is_match(word) && amount_confidence.is_none() {
            amount_confidence = Some(*conf);
        }
    }

    Line {
        text,
        date_confidence,
        amount_confidence,
    }
}
