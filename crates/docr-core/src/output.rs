//! JSON persistence for processed results.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::models::record::ProcessOutcome;

/// Write an outcome as pretty-printed JSON into `output_dir`, creating
/// the directory if needed.
///
/// The file name is derived from the source file: `invoice.pdf` becomes
/// `invoice_result.json`. Returns the written path.
pub fn save_result(
    outcome: &ProcessOutcome,
    source: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");
    let out_path = output_dir.join(format!("{stem}_result.json"));

    let content = serde_json::to_string_pretty(outcome)?;
    fs::write(&out_path, content)?;

    info!("saved result to {}", out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{DocumentFields, DocumentResult};

    fn outcome() -> ProcessOutcome {
        ProcessOutcome::Completed(DocumentResult {
            text: "hello".to_string(),
            pretty_text: vec!["hello".to_string()],
            fields: DocumentFields::default(),
            lines: Vec::new(),
            confidence: 42.0,
            file_path: "scan.pdf".to_string(),
            total_pages: 1,
        })
    }

    #[test]
    fn test_save_result_names_file_after_source_stem() {
        let dir = std::env::temp_dir().join("docr-output-test");
        std::fs::remove_dir_all(&dir).ok();

        let path = save_result(&outcome(), Path::new("scans/invoice.pdf"), &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "invoice_result.json");

        let written: ProcessOutcome =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, outcome());

        std::fs::remove_dir_all(&dir).ok();
    }
}
