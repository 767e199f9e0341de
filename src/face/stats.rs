//! Global luminance and edge statistics of a decoded photo.

use image::{GrayImage, Luma, RgbImage};

use super::quality::quality_score;
use super::round_places;

/// Pixel count that earns a full resolution score (1280x720).
pub const REFERENCE_PIXELS: f64 = 1280.0 * 720.0;

/// Gain applied to the mean edge response before clamping.
pub const SHARPNESS_GAIN: f64 = 1.5;

/// Neighbour offsets of the 3x3 find-edges kernel. The center weighs 8,
/// each neighbour -1.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Summary statistics of one photo. All scores are in [0, 1] and
/// rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStatistics {
    pub width: u32,
    pub height: u32,
    pub brightness: f64,
    pub sharpness: f64,
    pub resolution_score: f64,
    pub quality: f64,
}

impl ImageStatistics {
    /// Stand-in record for a missing photo.
    pub fn neutral() -> Self {
        Self {
            width: 0,
            height: 0,
            brightness: 0.5,
            sharpness: 0.5,
            resolution_score: 0.0,
            quality: 0.5,
        }
    }
}

/// Compute brightness, sharpness, resolution and quality for an image.
pub fn compute_statistics(rgb: &RgbImage) -> ImageStatistics {
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return ImageStatistics::neutral();
    }

    let gray = rgb_to_gray(rgb);
    let brightness = round_places((mean_intensity(&gray) / 255.0).clamp(0.0, 1.0), 3);
    let sharpness = round_places(edge_sharpness(&gray), 3);
    let resolution_score = round_places(resolution_score(width, height), 3);
    let quality = round_places(quality_score(sharpness, resolution_score, brightness), 3);

    ImageStatistics {
        width,
        height,
        brightness,
        sharpness,
        resolution_score,
        quality,
    }
}

/// Convert RGB image to grayscale using ITU-R BT.601 luminance.
pub fn rgb_to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (x, y, p) in rgb.enumerate_pixels() {
        let luma = 0.299 * p.0[0] as f32 + 0.587 * p.0[1] as f32 + 0.114 * p.0[2] as f32;
        gray.put_pixel(x, y, Luma([luma.round() as u8]));
    }
    gray
}

/// Mean pixel value (0-255). Zero for an empty image.
pub fn mean_intensity(img: &GrayImage) -> f64 {
    let count = u64::from(img.width()) * u64::from(img.height());
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = img.pixels().map(|p| u64::from(p.0[0])).sum();
    sum as f64 / count as f64
}

/// Find-edges response of a grayscale image. Borders take the nearest
/// pixel; negative responses clamp to 0.
///
/// This departs from PIL's `FIND_EDGES`, which copies border pixels through
/// unfiltered: a flat image scores 0 here but not under PIL.
pub fn find_edges(img: &GrayImage) -> GrayImage {
    let (w, h) = img.dimensions();
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let (max_x, max_y) = (i64::from(w) - 1, i64::from(h) - 1);
    let sample = |x: i64, y: i64| -> i32 {
        let p = img.get_pixel(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32);
        i32::from(p.0[0])
    };

    for (x, y, px) in out.enumerate_pixels_mut() {
        let (xi, yi) = (i64::from(x), i64::from(y));
        let mut response = 8 * sample(xi, yi);
        for (dx, dy) in NEIGHBOURS {
            response -= sample(xi + dx, yi + dy);
        }
        *px = Luma([response.clamp(0, 255) as u8]);
    }
    out
}

/// Crude sharpness: mean find-edges response scaled into [0, 1].
pub fn edge_sharpness(img: &GrayImage) -> f64 {
    let edges = find_edges(img);
    (mean_intensity(&edges) / 255.0 * SHARPNESS_GAIN).clamp(0.0, 1.0)
}

/// Pixel count relative to 1280x720, capped at 1.
pub fn resolution_score(width: u32, height: u32) -> f64 {
    let pixels = f64::from(width) * f64::from(height);
    (pixels / REFERENCE_PIXELS).clamp(0.0, 1.0)
}
