use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::{Calendar, FortuneTag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub heavenly_stem: String,
    pub earthly_branch: String,
    #[serde(default)]
    pub hidden_stems: Vec<String>,
}

/// One decade of the luck timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Luck {
    pub start_year: i32,
    pub end_year: i32,
    pub tag: FortuneTag,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SajuResult {
    pub pillars: BTreeMap<String, Pillar>,
    #[serde(default)]
    pub ten_gods: BTreeMap<String, String>,
    #[serde(default = "default_strength")]
    pub strength_score: f64,
    #[serde(default)]
    pub elements: BTreeMap<String, i32>,
    #[serde(default)]
    pub yongshin_candidates: Vec<String>,
    #[serde(default)]
    pub luck_timeline: Vec<Luck>,
}

fn default_strength() -> f64 {
    0.5
}

pub const DEFAULT_GENDER: &str = "unknown";
pub const DEFAULT_TZ: &str = "Asia/Seoul";

/// Body of `POST /v1/saju/compute`.
///
/// `calendar` is free text; values outside [`Calendar`] are accepted and
/// logged. Optional fields may be absent or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct SajuInput {
    pub birth_ts: String,
    pub calendar: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub tz: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

impl SajuInput {
    /// Known calendar kind, or `None` for an unrecognised value.
    pub fn calendar_kind(&self) -> Option<Calendar> {
        self.calendar.parse().ok()
    }

    pub fn gender(&self) -> &str {
        self.gender.as_deref().unwrap_or(DEFAULT_GENDER)
    }

    pub fn tz(&self) -> &str {
        self.tz.as_deref().unwrap_or(DEFAULT_TZ)
    }
}
