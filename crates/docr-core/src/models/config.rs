//! Configuration structures for the docr pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the docr pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocrConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// PDF rasterization configuration.
    pub raster: RasterConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Result output configuration.
    pub output: OutputConfig,
}

impl Default for DocrConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            raster: RasterConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Command used to invoke the engine binary.
    pub command: String,

    /// Recognition language passed to the engine.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// PDF rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Maximum pages to process per document (0 = unlimited).
    pub max_pages: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { max_pages: 0 }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many characters of page text the vendor recognizer sees.
    pub vendor_scan_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_scan_chars: 1000,
        }
    }
}

/// Result output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for persisted JSON results.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

impl DocrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocrConfig::default();
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.raster.max_pages, 0);
        assert_eq!(config.extraction.vendor_scan_chars, 1000);
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: DocrConfig =
            serde_json::from_str(r#"{"ocr": {"language": "deu"}}"#).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.extraction.vendor_scan_chars, 1000);
    }
}
