//! Embedded image blobs shared between the extractor and the transcoder.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// A raw image embedded in a Word document.
///
/// Created by the extractor for every image reference it resolves and consumed
/// exactly once by the transcoder, which takes it by value. The format is
/// sniffed from the content rather than trusted from the part name.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Raw encoded bytes as stored in the document package.
    bytes: Vec<u8>,
    /// Source format detected from magic bytes, if recognized.
    format: Option<ImageFormat>,
    /// Intrinsic `(width, height)` in pixels, if the header is readable.
    dimensions: Option<(u32, u32)>,
}

impl ImageAsset {
    /// Wrap raw image bytes, detecting the format and intrinsic size.
    ///
    /// Detection failures are not errors here: an unreadable blob still
    /// becomes an asset and is rejected later by the transcoder.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let format = image::guess_format(&bytes).ok();
        let dimensions = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());
        Self {
            bytes,
            format,
            dimensions,
        }
    }

    /// Raw encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the asset, returning its raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Declared source format, detected from content.
    #[must_use]
    pub const fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Intrinsic `(width, height)` in pixels.
    #[must_use]
    pub const fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Size of the encoded blob in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether browsers can display the source format without conversion.
    ///
    /// TIFF, BMP and the like are not web-safe and get flattened to RGB by
    /// the transcoder.
    #[must_use]
    pub fn is_web_safe(&self) -> bool {
        matches!(
            self.format,
            Some(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP)
        )
    }
}
