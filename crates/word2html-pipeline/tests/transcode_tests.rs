//! Tests for image transcoding: scaling, flattening, encoding choice and
//! failure handling.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use word2html_common::ImageAsset;
use word2html_pipeline::transcode::{
    FAILED_IMAGE_ALT, IMAGE_STYLE, OUTPUT_MIME, OutputEncoding, choose_encoding,
    flatten_onto_white, scaled_dimensions,
};
use word2html_pipeline::{ImageTranscoder, TranscodeError, transcode};

fn encoded(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

fn opaque_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    encoded(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

fn decode_payload(data_uri: &str) -> DynamicImage {
    let url = word2html_common::DataUrl::from_raw(data_uri.to_string());
    let bytes = url.decode().expect("base64 payload");
    image::load_from_memory(&bytes).expect("payload is an image")
}

#[test]
fn test_scaled_dimensions() {
    assert_eq!(scaled_dimensions(2000, 1000, 800), (800, 400));
    assert_eq!(scaled_dimensions(2000, 1001, 800), (800, 400));
    assert_eq!(scaled_dimensions(2000, 1003, 800), (800, 401));
    assert_eq!(scaled_dimensions(500, 300, 800), (500, 300));
    assert_eq!(scaled_dimensions(800, 300, 800), (800, 300));
    assert_eq!(scaled_dimensions(5000, 1, 800), (800, 1));
    assert_eq!(scaled_dimensions(5000, 3000, 0), (5000, 3000));
}

#[test]
fn test_wide_image_is_downsampled() {
    let asset = ImageAsset::from_bytes(opaque_png(2000, 1000));
    let image = transcode(asset, 800).expect("transcode");

    assert_eq!((image.width, image.height), (800, 400));
    assert_eq!(image.style, IMAGE_STYLE);
    assert!(image.data_uri.as_str().starts_with("data:image/png;base64,"));
    let decoded = decode_payload(image.data_uri.as_str());
    assert_eq!((decoded.width(), decoded.height()), (800, 400));
}

#[test]
fn test_narrow_image_keeps_size() {
    let asset = ImageAsset::from_bytes(opaque_png(500, 250));
    let image = transcode(asset, 800).expect("transcode");

    assert_eq!((image.width, image.height), (500, 250));
    assert_eq!(image.encoding, OutputEncoding::Png);
}

#[test]
fn test_tiff_is_flattened_and_jpeg_encoded() {
    let img = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 0]));
    let asset = ImageAsset::from_bytes(encoded(DynamicImage::ImageRgba8(img), ImageFormat::Tiff));
    assert!(!asset.is_web_safe());

    let image = transcode(asset, 800).expect("transcode");

    assert_eq!(image.encoding, OutputEncoding::Jpeg);
    assert_eq!(image.data_uri.media_type(), Some(OUTPUT_MIME));
    let decoded = decode_payload(image.data_uri.as_str());
    assert!(!decoded.color().has_alpha());
    // Fully transparent pixels end up white.
    let pixel = decoded.to_rgb8().get_pixel(10, 10).0;
    assert!(pixel.iter().all(|&c| c > 240), "{pixel:?}");
}

#[test]
fn test_transparent_png_stays_png() {
    let img = RgbaImage::from_pixel(10, 10, Rgba([0, 128, 0, 100]));
    let asset = ImageAsset::from_bytes(encoded(DynamicImage::ImageRgba8(img), ImageFormat::Png));

    let image = transcode(asset, 800).expect("transcode");

    assert_eq!(image.encoding, OutputEncoding::Png);
    assert!(decode_payload(image.data_uri.as_str()).color().has_alpha());
}

#[test]
fn test_choose_encoding() {
    assert_eq!(choose_encoding(Some(ImageFormat::Jpeg), false), OutputEncoding::Jpeg);
    assert_eq!(choose_encoding(Some(ImageFormat::WebP), false), OutputEncoding::Jpeg);
    assert_eq!(choose_encoding(Some(ImageFormat::WebP), true), OutputEncoding::Png);
    assert_eq!(choose_encoding(Some(ImageFormat::Gif), false), OutputEncoding::Png);
    assert_eq!(choose_encoding(Some(ImageFormat::Bmp), false), OutputEncoding::Png);
    assert_eq!(choose_encoding(None, false), OutputEncoding::Png);
}

#[test]
fn test_flatten_blends_partial_alpha() {
    let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
    let flat = flatten_onto_white(&DynamicImage::ImageRgba8(img));
    let [r, g, b] = flat.get_pixel(0, 0).0;
    assert_eq!((r, g, b), (127, 127, 127));
}

#[test]
fn test_corrupt_blob_is_unreadable() {
    let asset = ImageAsset::from_bytes(b"\x89PNG\r\n\x1a\nnot really".to_vec());
    let err = transcode(asset, 800).expect_err("corrupt blob");

    assert!(matches!(err, TranscodeError::Unreadable(_)));
    assert_eq!(err.reason(), "unreadable");
}

#[test]
fn test_transcoder_isolates_failures() {
    let mut transcoder = ImageTranscoder::new(800);

    let ok = transcoder.resolve(ImageAsset::from_bytes(opaque_png(4, 4)));
    let bad = transcoder.resolve(ImageAsset::from_bytes(Vec::new()));

    assert!(!ok.is_placeholder());
    assert_eq!(ok.style.as_deref(), Some(IMAGE_STYLE));
    assert!(bad.is_placeholder());
    assert_eq!(bad.src, "");
    assert_eq!(bad.fallback_alt.as_deref(), Some(FAILED_IMAGE_ALT));
    assert_eq!((transcoder.converted(), transcoder.failed()), (1, 1));
    assert_eq!(transcoder.take_warnings().len(), 1);
    assert!(transcoder.take_warnings().is_empty());
}
