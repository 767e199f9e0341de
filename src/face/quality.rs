//! Exposure and overall quality scoring.

pub const SHARPNESS_WEIGHT: f64 = 0.5;
pub const RESOLUTION_WEIGHT: f64 = 0.3;
pub const EXPOSURE_WEIGHT: f64 = 0.2;

/// Closeness of mean brightness to mid-gray: 1 at 0.5, 0 at either extreme.
pub fn exposure_score(brightness: f64) -> f64 {
    (1.0 - 2.0 * (brightness - 0.5).abs()).clamp(0.0, 1.0)
}

/// Weighted blend of sharpness, resolution and exposure, in [0, 1].
///
/// Inputs are clamped to [0, 1] before weighting.
pub fn quality_score(sharpness: f64, resolution_score: f64, brightness: f64) -> f64 {
    let sharpness = sharpness.clamp(0.0, 1.0);
    let resolution = resolution_score.clamp(0.0, 1.0);
    let exposure = exposure_score(brightness.clamp(0.0, 1.0));

    (SHARPNESS_WEIGHT * sharpness + RESOLUTION_WEIGHT * resolution + EXPOSURE_WEIGHT * exposure)
        .clamp(0.0, 1.0)
}
