//! Photo payload decoding: base64 / data URL → bytes → RGB image.

use std::io::Cursor;

use base64::Engine;
use image::io::Reader as ImageReader;
use image::RgbImage;

use super::FaceError;

/// Decode a base64 data URL to raw bytes.
///
/// Handles both `data:image/jpeg;base64,...` and raw base64 strings.
/// Everything after the first comma is the payload. ASCII whitespace
/// (line-wrapped encoders) is ignored.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let base64_data = match data_url.find(',') {
        Some(idx) => &data_url[idx + 1..],
        None => data_url,
    };

    let compact: String = base64_data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD.decode(compact)
}

/// Read width and height from the image header without decoding pixels.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), FaceError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FaceError::Decode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| FaceError::Decode(e.to_string()))
}

/// Size of the RGB8 buffer an image of these dimensions decodes into.
pub fn rgb_buffer_len(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * 3
}

/// Decode image bytes (PNG, JPEG, TIFF) into an RGB buffer.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, FaceError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| FaceError::Decode(e.to_string()))
}
