//! PDF page rasterization.
//!
//! A multi-page document is turned into an ordered sequence of page
//! images before OCR. The rasterizer is a boundary trait so the
//! processor can be exercised with synthetic pages in tests.

mod pdf;

pub use pdf::PdfRasterizer;

use image::DynamicImage;

use crate::error::RasterError;

/// Result type for rasterizer operations.
pub type Result<T> = std::result::Result<T, RasterError>;

/// Trait for page rasterizers.
pub trait Rasterizer: Send + Sync {
    /// Produce one image per page, in physical page order.
    fn rasterize(&self, data: &[u8]) -> Result<Vec<DynamicImage>>;
}
