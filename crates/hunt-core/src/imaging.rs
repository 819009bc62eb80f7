//! Image decoding, orientation and JPEG encoding shared by the store,
//! the map renderer and the report generator.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};
use std::io::Cursor;

use crate::error::{HuntError, Result};
use crate::models::Orientation;

/// JPEG quality for stored photos and snapshots
pub const JPEG_QUALITY: u8 = 80;

/// Decode any supported image format
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| HuntError::Image(format!("Failed to decode: {}", e)))
}

/// Encode as baseline RGB JPEG, dropping any alpha channel
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| HuntError::Image(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}

/// Read the EXIF orientation tag, if the container carries one
pub fn read_exif_orientation(bytes: &[u8]) -> Option<Orientation> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0).and_then(Orientation::from_exif)
}

/// Rotate and flip so the image displays upright with orientation `Up`
pub fn apply_orientation(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Up => image,
        Orientation::UpMirrored => image.fliph(),
        Orientation::Down => image.rotate180(),
        Orientation::DownMirrored => image.flipv(),
        Orientation::LeftMirrored => image.rotate90().fliph(),
        Orientation::Right => image.rotate90(),
        Orientation::RightMirrored => image.rotate270().fliph(),
        Orientation::Left => image.rotate270(),
    }
}

/// Mirror left to right
pub fn mirror_horizontally(image: DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Size that fits `width` x `height` into the bounds, keeping the aspect
/// ratio. Never enlarges.
pub fn fit_within(width: f64, height: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (max_width / width).min(max_height / height).min(1.0);
    (width * scale, height * scale)
}
