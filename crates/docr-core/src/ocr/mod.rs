//! OCR engine boundary.
//!
//! The recognition engine is an external collaborator: it receives a page
//! image and produces the page text plus index-aligned token data. The
//! aggregation pipeline consumes this boundary and never looks behind it.

mod tesseract;

pub use tesseract::TesseractEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Index-aligned flat token arrays produced by the OCR engine for one page.
///
/// Confidences are kept as the engine's raw strings: `-1` (and anything
/// that does not parse as an integer) marks "no confidence assigned" and
/// is handled by the grouping and aggregation layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrData {
    /// Recognized word texts.
    pub text: Vec<String>,

    /// Raw per-word confidence values.
    pub conf: Vec<String>,

    /// Block identifier per word.
    pub block_num: Vec<u32>,

    /// Paragraph identifier per word, scoped to its block.
    pub par_num: Vec<u32>,

    /// Line identifier per word, scoped to its paragraph.
    pub line_num: Vec<u32>,
}

impl OcrData {
    /// Number of token slots.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when no tokens are present.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append one token row.
    pub fn push(
        &mut self,
        text: impl Into<String>,
        conf: impl Into<String>,
        block: u32,
        par: u32,
        line: u32,
    ) {
        self.text.push(text.into());
        self.conf.push(conf.into());
        self.block_num.push(block);
        self.par_num.push(par);
        self.line_num.push(line);
    }
}

/// One page's output from the OCR engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Raw page text with the engine's own line layout.
    pub text: String,

    /// Token-level data.
    pub data: OcrData,
}

/// Trait for OCR engines.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Recognize a single page image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrOutput, OcrError>;
}
