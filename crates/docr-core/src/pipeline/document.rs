//! Multi-page document combining.

use crate::models::record::{DocumentFields, DocumentResult, PageResult};

use super::confidence::document_confidence;

/// Merge page results, already in physical page order, into one document
/// result.
///
/// The vendor comes from the first page only, even when empty; dates,
/// amounts, line items and lines concatenate across pages in page order.
/// An empty page sequence yields an empty result with confidence 0.0.
pub fn combine_pages(pages: Vec<PageResult>, file_path: impl Into<String>) -> DocumentResult {
    let confidence = document_confidence(&pages);
    let total_pages = pages.len();

    let text = pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let pretty_text = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let mut fields = DocumentFields::default();
    let mut lines = Vec::new();

    for (index, page) in pages.into_iter().enumerate() {
        if index == 0 {
            fields.vendor = page.fields.vendor;
        }
        fields.dates.extend(page.fields.dates);
        fields.amounts.extend(page.fields.amounts);
        fields.line_items.extend(page.fields.line_items);
        lines.extend(page.lines);
    }

    DocumentResult {
        text,
        pretty_text,
        fields,
        lines,
        confidence,
        file_path: file_path.into(),
        total_pages,
    }
}
