//! Core library for business-document OCR processing.
//!
//! This crate provides:
//! - PDF page rasterization (embedded page images via lopdf)
//! - An OCR engine boundary with a Tesseract subprocess adapter
//! - Token-to-line aggregation with per-line confidence signals
//! - Pattern-based field extraction (vendor, dates, amounts, line items)
//! - Page and multi-page document result composition

pub mod error;
pub mod models;
pub mod ocr;
pub mod raster;
pub mod pipeline;
pub mod extract;
pub mod processor;
pub mod output;

pub use error::{DocrError, Result};
pub use models::config::DocrConfig;
pub use models::record::{
    DocumentFields, DocumentResult, LineItem, LineRecord, PageResult, ProcessFailure,
    ProcessOutcome,
};
pub use ocr::{OcrData, OcrEngine, OcrOutput, TesseractEngine};
pub use raster::{PdfRasterizer, Rasterizer};
pub use pipeline::{build_page, combine_pages, document_confidence, group_lines, page_confidence, Line};
pub use extract::{FieldExtractor, OrgRecognizer};
pub use processor::DocumentProcessor;
pub use output::save_result;
