//! Vendor extraction through an injected organization recognizer.

/// Capability boundary for organization-name recognition.
///
/// Implementations receive a text prefix and return candidate
/// organization names in recognition order; the extractor takes the
/// first. Injected at construction time so tests can substitute stubs
/// and absence cleanly triggers the first-line fallback.
pub trait OrgRecognizer: Send + Sync {
    /// Recognizer identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Candidate organization names found in `text`, best first.
    fn organizations(&self, text: &str) -> Vec<String>;
}

/// First recognized organization within the first `scan_chars` characters
/// of `text`.
///
/// With no recognizer available the first line of the text, trimmed, is
/// used instead. A recognizer that finds nothing yields an empty string;
/// there is no fallback in that case.
pub(crate) fn extract_vendor(
    recognizer: Option<&dyn OrgRecognizer>,
    text: &str,
    scan_chars: usize,
) -> String {
    let Some(recognizer) = recognizer else {
        return text.lines().next().unwrap_or("").trim().to_string();
    };

    let prefix: String = text.chars().take(scan_chars).collect();
    recognizer
        .organizations(&prefix)
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer(Vec<&'static str>);

    impl OrgRecognizer for FixedRecognizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn organizations(&self, _text: &str) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    /// Records how much text it was given.
    struct PrefixProbe;

    impl OrgRecognizer for PrefixProbe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn organizations(&self, text: &str) -> Vec<String> {
            vec![text.chars().count().to_string()]
        }
    }

    #[test]
    fn test_first_recognized_org_wins() {
        let recognizer = FixedRecognizer(vec!["Acme Corp", "Globex"]);
        assert_eq!(
            extract_vendor(Some(&recognizer), "Acme Corp\nInvoice", 1000),
            "Acme Corp"
        );
    }

    #[test]
    fn test_recognizer_finding_nothing_yields_empty() {
        let recognizer = FixedRecognizer(vec![]);
        assert_eq!(
            extract_vendor(Some(&recognizer), "Acme Corp\nInvoice", 1000),
            ""
        );
    }

    #[test]
    fn test_no_recognizer_falls_back_to_first_line() {
        assert_eq!(
            extract_vendor(None, "  Acme Corp  \nInvoice 42", 1000),
            "Acme Corp"
        );
        assert_eq!(extract_vendor(None, "", 1000), "");
    }

    #[test]
    fn test_recognizer_sees_bounded_prefix() {
        let long_text = "x".repeat(5000);
        assert_eq!(
            extract_vendor(Some(&PrefixProbe), &long_text, 1000),
            "1000"
        );
    }
}
