//! Image transcoding: decode, flatten, downsample and re-encode.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! Every embedded image goes through the same fixed pipeline:
//!
//! 1. **Decode** - the `image` crate sniffs the container and decodes the
//!    first frame.
//! 2. **Flatten** - formats browsers cannot show (TIFF, BMP, ...) are
//!    composited onto opaque white and continue as RGB.
//! 3. **Downsample** - images wider than the limit are resized with Lanczos3,
//!    preserving the aspect ratio. Images are never upsampled.
//! 4. **Encode** - opaque photographic sources become JPEG at quality 85,
//!    everything else PNG, and the bytes are inlined as a `data:` URL.
//!
//! Failures are isolated per image: [`ImageTranscoder::resolve`] turns a
//! [`TranscodeError`] into a placeholder [`ImageSource`] and the conversion
//! carries on.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage};
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;
use word2html_common::warning::warn_once;
use word2html_common::{DataUrl, ImageAsset};

use crate::extract::ImageSource;

/// Media type declared by every inlined image, whatever the actual encoding.
///
/// NOTE: JPEG payloads are labelled `image/png` as well; consumers match on
/// the single fixed `data:image/png;base64,` prefix.
pub const OUTPUT_MIME: &str = "image/png";

/// JPEG quality used for photographic images.
pub const JPEG_QUALITY: u8 = 85;

/// Display style attached to every transcoded image.
pub const IMAGE_STYLE: &str = "max-width: 100%; height: auto; display: block; margin: 10px auto";

/// Alt text of the placeholder that replaces an image that failed to convert.
pub const FAILED_IMAGE_ALT: &str = "Image could not be converted";

/// Why an image could not be transcoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    /// The blob is not a decodable raster image.
    #[error("unreadable image: {0}")]
    Unreadable(String),
    /// The decoded bitmap could not be re-encoded.
    #[error("could not encode image: {0}")]
    Encode(String),
}

impl TranscodeError {
    /// Short machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Unreadable(_) => "unreadable",
            Self::Encode(_) => "encode",
        }
    }
}

/// Encoding chosen for the output bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum OutputEncoding {
    /// Lossy, for opaque photographic sources.
    #[strum(serialize = "jpeg")]
    Jpeg,
    /// Lossless, for line art and anything with transparency.
    #[strum(serialize = "png")]
    Png,
}

/// Result of a successful transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedImage {
    /// Inline `data:` reference for the `src` attribute.
    pub data_uri: DataUrl,
    /// Display style for the `style` attribute.
    pub style: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoding actually used for the payload.
    pub encoding: OutputEncoding,
}

/// Transcode one embedded image into an inline data reference.
///
/// # Errors
///
/// Returns [`TranscodeError::Unreadable`] if the blob cannot be decoded and
/// [`TranscodeError::Encode`] if the bitmap cannot be re-encoded.
pub fn transcode(asset: ImageAsset, max_width: u32) -> Result<TranscodedImage, TranscodeError> {
    let web_safe = asset.is_web_safe();
    let source_format = asset.format();

    let mut bitmap = image::load_from_memory(&asset.into_bytes())
        .map_err(|e| TranscodeError::Unreadable(e.to_string()))?;

    if !web_safe {
        bitmap = DynamicImage::ImageRgb8(flatten_onto_white(&bitmap));
    }

    let (width, height) = scaled_dimensions(bitmap.width(), bitmap.height(), max_width);
    if (width, height) != (bitmap.width(), bitmap.height()) {
        bitmap = bitmap.resize_exact(width, height, FilterType::Lanczos3);
    }

    let encoding = choose_encoding(source_format, bitmap.color().has_alpha());
    let bytes = encode(&bitmap, encoding)?;

    Ok(TranscodedImage {
        data_uri: DataUrl::encode(OUTPUT_MIME, &bytes),
        style: IMAGE_STYLE,
        width,
        height,
        encoding,
    })
}

/// Target size for an image of `width × height` under a width limit.
///
/// Images no wider than `max_width` keep their size. Wider images are scaled
/// to exactly `max_width` with the height rounded to the nearest pixel, and
/// never below one pixel. A limit of zero disables scaling.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if max_width == 0 || width <= max_width {
        return (width, height);
    }
    let scaled = (f64::from(height) * f64::from(max_width) / f64::from(width)).round();
    (max_width, (scaled as u32).max(1))
}

/// Pick the output encoding for a decoded bitmap.
///
/// Anything with an alpha channel stays PNG. Opaque bitmaps from lossy or
/// photographic containers (JPEG, TIFF, WebP) become JPEG.
#[must_use]
pub const fn choose_encoding(source: Option<ImageFormat>, has_alpha: bool) -> OutputEncoding {
    if has_alpha {
        return OutputEncoding::Png;
    }
    match source {
        Some(ImageFormat::Jpeg | ImageFormat::Tiff | ImageFormat::WebP) => OutputEncoding::Jpeg,
        _ => OutputEncoding::Png,
    }
}

/// Composite a bitmap onto opaque white, dropping the alpha channel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn flatten_onto_white(bitmap: &DynamicImage) -> RgbImage {
    let rgba = bitmap.to_rgba8();
    let mut out = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f32::from(a) / 255.0;
        let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}

fn encode(bitmap: &DynamicImage, encoding: OutputEncoding) -> Result<Vec<u8>, TranscodeError> {
    let mut buf = Vec::new();
    let result = match encoding {
        OutputEncoding::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(bitmap.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY))
        }
        OutputEncoding::Png => {
            let writable = match bitmap.color() {
                ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
                    bitmap.clone()
                }
                color if color.has_alpha() => DynamicImage::ImageRgba8(bitmap.to_rgba8()),
                _ => DynamicImage::ImageRgb8(bitmap.to_rgb8()),
            };
            writable.write_with_encoder(PngEncoder::new(&mut buf))
        }
    };
    result.map_err(|e| TranscodeError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Stateful transcoder handed to extractors as their image callback.
///
/// Counts successes and failures and collects a warning per failed image.
#[derive(Debug, Clone)]
pub struct ImageTranscoder {
    max_width: u32,
    converted: usize,
    failed: usize,
    warnings: Vec<String>,
}

impl ImageTranscoder {
    /// Create a transcoder with the given width limit.
    #[must_use]
    pub const fn new(max_width: u32) -> Self {
        Self {
            max_width,
            converted: 0,
            failed: 0,
            warnings: Vec::new(),
        }
    }

    /// Transcode `asset`, substituting a placeholder on failure.
    pub fn resolve(&mut self, asset: ImageAsset) -> ImageSource {
        let size = asset.len();
        match transcode(asset, self.max_width) {
            Ok(image) => {
                self.converted += 1;
                ImageSource::inline(image.data_uri.into_string(), image.style)
            }
            Err(e) => {
                self.failed += 1;
                let message = format!("image #{} ({size} bytes) skipped: {e}", self.seen());
                warn_once("image", &message);
                self.warnings.push(message);
                ImageSource::failed()
            }
        }
    }

    /// Number of images inlined successfully.
    #[must_use]
    pub const fn converted(&self) -> usize {
        self.converted
    }

    /// Number of images replaced by a placeholder.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Number of images seen so far.
    #[must_use]
    pub const fn seen(&self) -> usize {
        self.converted + self.failed
    }

    /// Take the collected failure messages.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
