//! PDF rasterization using lopdf.
//!
//! Scanned business documents are typically PDFs whose pages each embed
//! one full-page image. Rasterization extracts that embedded image per
//! page instead of rendering vector content: JPEG streams (DCTDecode) are
//! decoded directly, raw DeviceRGB/DeviceGray streams are rebuilt pixel
//! by pixel.

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{Rasterizer, Result};
use crate::error::RasterError;

/// Rasterizer for scanned PDFs backed by lopdf.
#[derive(Debug, Default)]
pub struct PdfRasterizer;

impl PdfRasterizer {
    /// Create a new PDF rasterizer.
    pub fn new() -> Self {
        Self
    }

    fn load(&self, data: &[u8]) -> Result<Document> {
        let mut doc = Document::load_mem(data).map_err(|e| RasterError::Parse(e.to_string()))?;

        // PDFs encrypted with an empty password are still readable.
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(RasterError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
        }

        if doc.get_pages().is_empty() {
            return Err(RasterError::NoPages);
        }

        Ok(doc)
    }

    /// The first decodable image XObject reachable from a page's resources.
    fn page_image(&self, doc: &Document, page_id: ObjectId) -> Option<DynamicImage> {
        let resources = self.page_resources(doc, page_id)?;

        if let Ok(xobjects) = resources.get(b"XObject") {
            if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
                for (_name, obj_ref) in xobj_dict.iter() {
                    if let Ok((_, obj)) = doc.dereference(obj_ref) {
                        if let Some(img) = self.decode_image_object(doc, obj) {
                            return Some(img);
                        }
                    }
                }
            }
        }

        None
    }

    /// Resources dictionary for a page, walking up the page tree for
    /// inherited entries.
    fn page_resources(&self, doc: &Document, node_id: ObjectId) -> Option<lopdf::Dictionary> {
        let node = doc.get_object(node_id).ok()?;
        let Object::Dictionary(dict) = node else {
            return None;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok((_, Object::Dictionary(res))) = doc.dereference(resources) {
                return Some(res.clone());
            }
        }

        if let Ok(parent_ref) = dict.get(b"Parent") {
            if let Object::Reference(parent_id) = parent_ref {
                return self.page_resources(doc, *parent_id);
            }
        }

        None
    }

    /// Every decodable image in the document, in object order.
    fn document_images(&self, doc: &Document) -> Vec<DynamicImage> {
        let mut images = Vec::new();

        for (_id, object) in doc.objects.iter() {
            if let Some(img) = self.decode_image_object(doc, object) {
                images.push(img);
            }
        }

        debug!("document-wide scan found {} images", images.len());
        images
    }

    fn decode_image_object(&self, doc: &Document, obj: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
        trace!("image object {}x{}", width, height);

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        if let Ok(filter) = dict.get(b"Filter") {
            let filter_name = match filter {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) if !arr.is_empty() => {
                    arr.first().and_then(|o| o.as_name().ok())
                }
                _ => None,
            };

            match filter_name {
                Some(b"DCTDecode") => {
                    // JPEG stream, decodable as-is.
                    return image::load_from_memory_with_format(
                        &stream.content,
                        image::ImageFormat::Jpeg,
                    )
                    .ok();
                }
                Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                    // Codecs the image crate cannot decode.
                    trace!("unsupported image filter, skipping object");
                    return None;
                }
                _ => {}
            }
        }

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8) as u8;

        self.image_from_raw(&data, width, height, color_space, bits)
    }

    fn image_from_raw(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        color_space: &[u8],
        bits_per_component: u8,
    ) -> Option<DynamicImage> {
        if bits_per_component != 8 {
            trace!("unsupported bits per component: {}", bits_per_component);
            return None;
        }

        let expected_rgb = (width * height * 3) as usize;
        let expected_gray = (width * height) as usize;

        if (color_space == b"DeviceRGB" || color_space == b"RGB") && data.len() >= expected_rgb {
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for chunk in data[..expected_rgb].chunks(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(255);
            }
            return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
                .map(DynamicImage::ImageRgba8);
        }

        if (color_space == b"DeviceGray" || color_space == b"G") && data.len() >= expected_gray {
            let mut rgba = Vec::with_capacity((width * height * 4) as usize);
            for &gray in &data[..expected_gray] {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
            return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
                .map(DynamicImage::ImageRgba8);
        }

        trace!(
            "could not decode raw image: data_len={}, expected_rgb={}, expected_gray={}",
            data.len(),
            expected_rgb,
            expected_gray
        );
        None
    }
}

impl Rasterizer for PdfRasterizer {
    fn rasterize(&self, data: &[u8]) -> Result<Vec<DynamicImage>> {
        let doc = self.load(data)?;
        let page_ids: Vec<(u32, ObjectId)> =
            doc.get_pages().iter().map(|(n, id)| (*n, *id)).collect();

        let mut images = Vec::with_capacity(page_ids.len());
        let mut fallback: Option<Vec<DynamicImage>> = None;

        for (page_num, page_id) in &page_ids {
            if let Some(img) = self.page_image(&doc, *page_id) {
                images.push(img);
                continue;
            }

            // Pages without their own image XObject: index into the
            // document-wide image scan by page position.
            trace!("no page-linked image for page {page_num}, using document scan");
            let all = fallback.get_or_insert_with(|| self.document_images(&doc));
            match all.get(images.len()) {
                Some(img) => images.push(img.clone()),
                None => return Err(RasterError::PageImage(*page_num)),
            }
        }

        debug!("rasterized {} pages", images.len());
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let rasterizer = PdfRasterizer::new();
        let result = rasterizer.rasterize(b"definitely not a pdf");
        assert!(matches!(result, Err(RasterError::Parse(_))));
    }

    #[test]
    fn test_raw_rgb_decode() {
        let rasterizer = PdfRasterizer::new();
        let pixels = vec![10u8, 20, 30, 40, 50, 60];

        let img = rasterizer
            .image_from_raw(&pixels, 2, 1, b"DeviceRGB", 8)
            .unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
    }

    #[test]
    fn test_raw_gray_decode() {
        let rasterizer = PdfRasterizer::new();
        let img = rasterizer
            .image_from_raw(&[128, 255], 2, 1, b"DeviceGray", 8)
            .unwrap();
        assert_eq!(img.width(), 2);
    }

    #[test]
    fn test_unsupported_bit_depth_rejected() {
        let rasterizer = PdfRasterizer::new();
        assert!(rasterizer
            .image_from_raw(&[0, 0, 0], 1, 1, b"DeviceRGB", 1)
            .is_none());
    }
}
