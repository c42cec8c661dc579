//! Page- and document-level confidence aggregation.

use crate::models::record::PageResult;
use crate::ocr::OcrData;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of all token confidences that parse as non-negative integers,
/// rounded to two decimals.
///
/// Sentinel and unparseable values are excluded from both numerator and
/// denominator. Returns 0.0 when no valid samples remain.
pub fn page_confidence(data: &OcrData) -> f64 {
    let samples: Vec<i64> = data
        .conf
        .iter()
        .filter_map(|raw| raw.trim().parse::<i64>().ok())
        .filter(|&conf| conf >= 0)
        .collect();

    if samples.is_empty() {
        return 0.0;
    }

    round2(samples.iter().sum::<i64>() as f64 / samples.len() as f64)
}

/// Mean of per-page confidences, rounded to two decimals.
///
/// This is not a re-aggregation over tokens: a page with few tokens
/// carries the same weight as a page with many. Returns 0.0 for an empty
/// page sequence.
pub fn document_confidence(pages: &[PageResult]) -> f64 {
    if pages.is_empty() {
        return 0.0;
    }

    round2(pages.iter().map(|page| page.confidence).sum::<f64>() / pages.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::DocumentFields;

    fn data_with_confs(confs: &[&str]) -> OcrData {
        let mut data = OcrData::default();
        for (i, conf) in confs.iter().enumerate() {
            data.push(format!("w{i}"), *conf, 1, 1, 1);
        }
        data
    }

    fn page(confidence: f64) -> PageResult {
        PageResult {
            text: String::new(),
            lines: Vec::new(),
            fields: DocumentFields::default(),
            confidence,
        }
    }

    #[test]
    fn test_page_confidence_is_exact_rounded_mean() {
        assert_eq!(page_confidence(&data_with_confs(&["90", "85", "80"])), 85.0);
        assert_eq!(page_confidence(&data_with_confs(&["1", "2"])), 1.5);
        assert_eq!(page_confidence(&data_with_confs(&["1", "1", "2"])), 1.33);
    }

    #[test]
    fn test_sentinels_never_contribute() {
        // Not 56.33: the sentinel is excluded from the denominator too.
        assert_eq!(page_confidence(&data_with_confs(&["90", "-1", "80"])), 85.0);
        assert_eq!(
            page_confidence(&data_with_confs(&["90", "oops", "96.5", "80"])),
            85.0
        );
    }

    #[test]
    fn test_no_valid_samples_defaults_to_zero() {
        assert_eq!(page_confidence(&OcrData::default()), 0.0);
        assert_eq!(page_confidence(&data_with_confs(&["-1", "-1"])), 0.0);
    }

    #[test]
    fn test_document_confidence_weighs_pages_equally() {
        let pages = vec![page(90.0), page(50.0)];
        assert_eq!(document_confidence(&pages), 70.0);

        assert_eq!(document_confidence(&[page(80.0), page(85.5)]), 82.75);
    }

    #[test]
    fn test_document_confidence_empty_is_zero() {
        assert_eq!(document_confidence(&[]), 0.0);
    }
}
