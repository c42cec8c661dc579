//! Tesseract subprocess engine.
//!
//! Invokes the system `tesseract` binary twice per page: a plain run for
//! the raw page text (preserving the engine's own line layout) and a TSV
//! run for token-level data. The page image is handed over through a
//! temporary PNG file.

use std::path::Path;
use std::process::Command;

use image::DynamicImage;
use tracing::debug;

use super::{OcrData, OcrEngine, OcrOutput};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Column layout of tesseract TSV output. Word rows carry level 5.
const TSV_COLUMNS: usize = 12;
const TSV_WORD_LEVEL: &str = "5";

/// OCR engine backed by the system `tesseract` binary.
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    /// Engine using the configured command and language.
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
        }
    }

    /// Engine invoking `command` with the given language.
    pub fn with_command(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    fn run(&self, image_path: &Path, extra: &[&str]) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(extra)
            .output()
            .map_err(|e| OcrError::Engine(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrOutput, OcrError> {
        let tmp = tempfile::Builder::new()
            .prefix("docr-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        image
            .save(tmp.path())
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let text = self.run(tmp.path(), &[])?;
        let data = parse_tsv(&self.run(tmp.path(), &["tsv"])?);

        debug!("recognized {} tokens", data.len());
        Ok(OcrOutput { text, data })
    }
}

/// Parse tesseract TSV output into flat token arrays.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Only word rows (level 5) carry
/// tokens; confidence values are passed through as raw strings.
fn parse_tsv(tsv: &str) -> OcrData {
    let mut data = OcrData::default();

    for row in tsv.lines() {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS || cols[0] != TSV_WORD_LEVEL {
            continue;
        }

        let block = cols[2].parse().unwrap_or(0);
        let par = cols[3].parse().unwrap_or(0);
        let line = cols[4].parse().unwrap_or(0);
        data.push(cols[11], cols[10], block, par, line);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn test_parse_tsv_word_rows_only() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t10\t60\t20\t92\tInvoice\n\
             5\t1\t1\t1\t1\t2\t80\t10\t70\t20\t88\t04/07/2025\n\
             5\t1\t2\t1\t1\t1\t10\t50\t50\t20\t-1\t \n"
        );

        let data = parse_tsv(&tsv);
        assert_eq!(data.len(), 3);
        assert_eq!(data.text, vec!["Invoice", "04/07/2025", " "]);
        assert_eq!(data.conf, vec!["92", "88", "-1"]);
        assert_eq!(data.block_num, vec![1, 1, 2]);
    }

    #[test]
    fn test_parse_tsv_skips_short_rows() {
        let data = parse_tsv("5\t1\t1\n\nnot a row at all");
        assert!(data.is_empty());
    }
}
