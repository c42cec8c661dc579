//! Document routing and per-page orchestration.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{ProcessError, Result};
use crate::extract::{FieldExtractor, OrgRecognizer};
use crate::models::config::DocrConfig;
use crate::models::record::{PageResult, ProcessFailure, ProcessOutcome};
use crate::ocr::OcrEngine;
use crate::pipeline::{build_page, combine_pages};
use crate::raster::{PdfRasterizer, Rasterizer};

/// File extensions routed to the single-image path.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

/// Routes documents through rasterization, OCR and extraction.
///
/// Pages carry no data dependency on each other, so multi-page documents
/// are OCRed in parallel and reassembled into physical page order before
/// combining.
pub struct DocumentProcessor {
    engine: Arc<dyn OcrEngine>,
    rasterizer: Arc<dyn Rasterizer>,
    extractor: FieldExtractor,
    max_pages: usize,
}

impl DocumentProcessor {
    /// Processor with the given engine, the PDF rasterizer and no
    /// organization recognizer.
    pub fn new(engine: Arc<dyn OcrEngine>, config: &DocrConfig) -> Self {
        Self {
            engine,
            rasterizer: Arc::new(PdfRasterizer::new()),
            extractor: FieldExtractor::new()
                .with_vendor_scan_chars(config.extraction.vendor_scan_chars),
            max_pages: config.raster.max_pages,
        }
    }

    /// Substitute the rasterizer.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    /// Attach an organization recognizer for vendor extraction.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn OrgRecognizer>) -> Self {
        self.extractor = self.extractor.with_recognizer(recognizer);
        self
    }

    /// Process one file into a document outcome.
    ///
    /// Unsupported and unreadable inputs come back as rejected outcomes so
    /// batch callers can log them and keep going; only engine and I/O
    /// failures surface as errors.
    pub fn process_document(&self, path: &Path) -> Result<ProcessOutcome> {
        info!("processing {}", path.display());

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if ext == "pdf" {
            return self.process_pdf(path);
        }
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return self.process_image(path);
        }

        Ok(rejected(path, ProcessError::UnsupportedFormat(ext)))
    }

    /// OCR and compose a single page image.
    pub fn process_page(&self, image: &DynamicImage) -> Result<PageResult> {
        let output = self.engine.recognize(image)?;
        Ok(build_page(&output, &self.extractor))
    }

    fn process_pdf(&self, path: &Path) -> Result<ProcessOutcome> {
        let data = std::fs::read(path)?;

        let mut images = match self.rasterizer.rasterize(&data) {
            Ok(images) => images,
            Err(e) => {
                warn!("rasterization failed for {}: {}", path.display(), e);
                return Ok(ProcessOutcome::Rejected(ProcessFailure {
                    file_path: path.display().to_string(),
                    error: e.to_string(),
                }));
            }
        };

        if self.max_pages > 0 && images.len() > self.max_pages {
            warn!(
                "{} has {} pages, truncating to {}",
                path.display(),
                images.len(),
                self.max_pages
            );
            images.truncate(self.max_pages);
        }

        debug!("rasterized {} pages from {}", images.len(), path.display());
        let pages = self.process_pages(images)?;
        Ok(ProcessOutcome::Completed(combine_pages(
            pages,
            path.display().to_string(),
        )))
    }

    fn process_image(&self, path: &Path) -> Result<ProcessOutcome> {
        let image = match image::open(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("could not read image {}: {}", path.display(), e);
                return Ok(rejected(path, ProcessError::UnreadableImage(e.to_string())));
            }
        };

        let page = self.process_page(&image)?;
        Ok(ProcessOutcome::Completed(combine_pages(
            vec![page],
            path.display().to_string(),
        )))
    }

    /// OCR all pages in parallel, each task carrying its page index, and
    /// reassemble into physical page order.
    fn process_pages(&self, images: Vec<DynamicImage>) -> Result<Vec<PageResult>> {
        let mut indexed: Vec<(usize, PageResult)> = images
            .into_par_iter()
            .enumerate()
            .map(|(index, image)| self.process_page(&image).map(|page| (index, page)))
            .collect::<Result<Vec<_>>>()?;

        // Completion order must not leak into page order.
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, page)| page).collect())
    }
}

fn rejected(path: &Path, error: ProcessError) -> ProcessOutcome {
    ProcessOutcome::Rejected(ProcessFailure {
        file_path: path.display().to_string(),
        error: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::ocr::{OcrData, OcrOutput};
    use crate::raster::Result as RasterResult;
    use std::io::Write;

    /// Engine keyed on image width so parallel page order is observable.
    struct WidthEngine;

    impl OcrEngine for WidthEngine {
        fn name(&self) -> &'static str {
            "width-stub"
        }

        fn recognize(&self, image: &DynamicImage) -> std::result::Result<OcrOutput, OcrError> {
            let label = format!("page-{}", image.width());
            let mut data = OcrData::default();
            data.push(label.clone(), image.width().to_string(), 1, 1, 1);
            Ok(OcrOutput { text: label, data })
        }
    }

    /// Rasterizer producing `n` pages of increasing width.
    struct StubRasterizer(u32);

    impl Rasterizer for StubRasterizer {
        fn rasterize(&self, _data: &[u8]) -> RasterResult<Vec<DynamicImage>> {
            Ok((1..=self.0)
                .map(|w| DynamicImage::new_rgb8(w, 1))
                .collect())
        }
    }

    fn processor(pages: u32) -> DocumentProcessor {
        DocumentProcessor::new(Arc::new(WidthEngine), &DocrConfig::default())
            .with_rasterizer(Arc::new(StubRasterizer(pages)))
    }

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_unsupported_extension_is_rejected_not_raised() {
        let outcome = processor(1)
            .process_document(Path::new("notes.docx"))
            .unwrap();

        assert!(outcome.is_rejected());
        match outcome {
            ProcessOutcome::Rejected(failure) => {
                assert!(failure.error.contains("unsupported"));
                assert_eq!(failure.file_path, "notes.docx");
            }
            ProcessOutcome::Completed(_) => unreachable!(),
        }
    }

    #[test]
    fn test_unreadable_image_is_rejected_not_raised() {
        let path = temp_file("docr-bad-image.png", b"not an image");

        let outcome = processor(1).process_document(&path).unwrap();
        assert!(outcome.is_rejected());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_pdf_pages_keep_physical_order() {
        let path = temp_file("docr-three-pages.pdf", b"stub");

        let outcome = processor(3).process_document(&path).unwrap();
        let doc = outcome.document().unwrap();

        assert_eq!(doc.total_pages, 3);
        assert_eq!(doc.text, "page-1\npage-2\npage-3");
        assert_eq!(doc.lines.len(), 3);
        assert_eq!(doc.lines[0].text, "page-1");
        assert_eq!(doc.lines[2].text, "page-3");
        // Vendor comes from the first page (first-line fallback).
        assert_eq!(doc.fields.vendor, "page-1");
        // Page confidences are 1, 2, 3 -> document mean 2.0.
        assert_eq!(doc.confidence, 2.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_zero_pages_do_not_crash_combining() {
        let path = temp_file("docr-zero-pages.pdf", b"stub");

        let outcome = processor(0).process_document(&path).unwrap();
        let doc = outcome.document().unwrap();
        assert_eq!(doc.total_pages, 0);
        assert_eq!(doc.confidence, 0.0);

        std::fs::remove_file(&path).ok();
    }
}
