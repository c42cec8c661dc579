//! Error types for the docr-core library.

use thiserror::Error;

/// Main error type for the docr library.
#[derive(Error, Debug)]
pub enum DocrError {
    /// PDF rasterization error.
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),

    /// OCR engine error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Document routing error.
    #[error("processing error: {0}")]
    Process(#[from] ProcessError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF page rasterization.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No page image could be produced for a page.
    #[error("no page image for page {0}")]
    PageImage(u32),
}

/// Errors related to the OCR engine boundary.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be invoked or exited with an error.
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// The input image could not be handed to the engine.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Recoverable routing failures, surfaced as result objects rather than
/// raised, so a batch driver can log and continue.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// File extension not among the recognized image/PDF set.
    #[error("unsupported file type: .{0}")]
    UnsupportedFormat(String),

    /// The loader returned no decodable image.
    #[error("image not readable: {0}")]
    UnreadableImage(String),
}

/// Result type for the docr library.
pub type Result<T> = std::result::Result<T, DocrError>;
