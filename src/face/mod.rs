//! Face-reading pipeline: photo payload → image statistics → traits.
//!
//! Nothing here is real facial analysis. The "face" result is built from
//! global grayscale statistics of the uploaded photo:
//!
//! 1. `decode`: base64 / data URL → bytes → RGB image
//! 2. `stats`: brightness, find-edges sharpness proxy, resolution score
//! 3. `quality`: exposure score and the bounded quality blend
//! 4. `traits`: five affine remaps of the statistics
//!
//! Blank or undecodable base64 yields the neutral statistics record.
//! Bytes that decode from base64 but are not an image are an error.

pub mod decode;
pub mod quality;
pub mod stats;
pub mod traits;

pub use decode::*;
pub use quality::*;
pub use stats::*;
pub use traits::*;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::FaceResult;

#[derive(Error, Debug)]
pub enum FaceError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Decoded image needs {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: usize },
}

/// Round to a fixed number of decimal places for presentation.
pub fn round_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Decode a photo payload and compute its statistics.
///
/// `max_bytes` bounds the decoded RGB pixel buffer. The header is read
/// first so an oversized image is refused before any pixel is decoded.
pub fn analyze_payload(image_base64: &str, max_bytes: usize) -> Result<ImageStatistics, FaceError> {
    if image_base64.trim().is_empty() {
        debug!("Empty image payload, using neutral statistics");
        return Ok(ImageStatistics::neutral());
    }

    let bytes = match decode_data_url(image_base64) {
        Ok(bytes) if bytes.is_empty() => {
            debug!("Image payload decoded to zero bytes, using neutral statistics");
            return Ok(ImageStatistics::neutral());
        }
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Unparseable image payload, using neutral statistics");
            return Ok(ImageStatistics::neutral());
        }
    };

    let (width, height) = read_dimensions(&bytes)?;
    let size = rgb_buffer_len(width, height);
    if size > max_bytes as u64 {
        warn!(width, height, size, limit = max_bytes, "Decoded image over limit");
        return Err(FaceError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let rgb = decode_image(&bytes)?;
    let stats = compute_statistics(&rgb);
    debug!(
        width = stats.width,
        height = stats.height,
        brightness = stats.brightness,
        sharpness = stats.sharpness,
        quality = stats.quality,
        "Image statistics computed"
    );
    Ok(stats)
}

/// Build the `/v1/face/extract` response from a photo payload.
pub fn extract_face(image_base64: &str, max_bytes: usize) -> Result<FaceResult, FaceError> {
    let stats = analyze_payload(image_base64, max_bytes)?;
    Ok(face_result_from_stats(&stats))
}

pub fn face_result_from_stats(stats: &ImageStatistics) -> FaceResult {
    let mut features = BTreeMap::new();
    features.insert("img_w".to_string(), f64::from(stats.width));
    features.insert("img_h".to_string(), f64::from(stats.height));
    features.insert("brightness".to_string(), stats.brightness);
    features.insert("sharpness".to_string(), stats.sharpness);

    FaceResult {
        quality: stats.quality,
        landmarks: None,
        features,
        regions: BTreeMap::new(),
        traits: map_traits(stats).into_map(),
    }
}
