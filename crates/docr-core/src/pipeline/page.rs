//! Page result composition.

use crate::extract::FieldExtractor;
use crate::models::record::PageResult;
use crate::ocr::OcrOutput;

use super::confidence::page_confidence;
use super::lines::group_lines;

/// Compose one page's engine output into a [`PageResult`].
///
/// Pure composition: grouping, confidence aggregation and field
/// extraction run against the same page output with no extra logic.
pub fn build_page(output: &OcrOutput, extractor: &FieldExtractor) -> PageResult {
    let lines = group_lines(&output.data)
        .iter()
        .map(|line| line.to_record())
        .collect();

    PageResult {
        text: output.text.clone(),
        lines,
        fields: extractor.extract(&output.text),
        confidence: page_confidence(&output.data),
    }
}
