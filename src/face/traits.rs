//! Trait scores derived from image statistics.
//!
//! Scores are affine remaps around 0.5 and are deliberately left
//! unclamped: extreme photos can push a score outside [0, 1].

use std::collections::BTreeMap;

use serde::Serialize;

use super::round_places;
use super::stats::ImageStatistics;

pub const TRAIT_NAMES: [&str; 5] = ["clarity", "stability", "sociality", "determination", "resilience"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraitSet {
    pub clarity: f64,
    pub stability: f64,
    pub sociality: f64,
    pub determination: f64,
    pub resilience: f64,
}

impl TraitSet {
    pub fn into_map(self) -> BTreeMap<String, f64> {
        TRAIT_NAMES
            .iter()
            .zip([
                self.clarity,
                self.stability,
                self.sociality,
                self.determination,
                self.resilience,
            ])
            .map(|(name, score)| (name.to_string(), score))
            .collect()
    }
}

/// Map statistics to the five trait scores, rounded to 2 decimals.
pub fn map_traits(stats: &ImageStatistics) -> TraitSet {
    let ImageStatistics {
        brightness,
        sharpness,
        quality,
        ..
    } = *stats;

    TraitSet {
        clarity: round_places(0.5 + (sharpness - 0.5) * 0.8, 2),
        stability: round_places(0.5 + (0.5 - (brightness - 0.5).abs()) * 0.6, 2),
        sociality: round_places(0.5 + (brightness - 0.5) * 0.4, 2),
        determination: round_places(0.5 + (sharpness - 0.5) * 0.5, 2),
        resilience: round_places(0.5 + (quality - 0.5) * 0.6, 2),
    }
}
