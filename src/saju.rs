//! Saju (four pillars) chart.
//!
//! The chart is a fixed demo chart. Only the luck timeline moves with the
//! input: it starts the year after the parsed birth year. An unparseable
//! `birth_ts` falls back to 1990 instead of failing the request.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::face::round_places;
use crate::models::{FortuneTag, Luck, Pillar, SajuInput, SajuResult};

/// Reference year used when `birth_ts` cannot be parsed.
pub const DEFAULT_BIRTH_YEAR: i32 = 1990;

/// Years covered by one luck period.
const LUCK_PERIOD_YEARS: i32 = 10;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Extract the calendar year from an ISO-8601 style timestamp.
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive date-times with `T` or
/// space separators, and bare dates.
pub fn parse_birth_year(birth_ts: &str) -> Option<i32> {
    let ts = birth_ts.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.year());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(dt.year());
        }
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Compute the (stubbed) saju chart for a birth input.
pub fn compute_saju(input: &SajuInput) -> SajuResult {
    let year = parse_birth_year(&input.birth_ts).unwrap_or_else(|| {
        tracing::debug!(birth_ts = %input.birth_ts, "Unparseable birth_ts, using default year");
        DEFAULT_BIRTH_YEAR
    });

    if input.calendar_kind().is_none() {
        tracing::warn!(calendar = %input.calendar, "Unrecognised calendar, chart is unaffected");
    }

    tracing::debug!(
        year,
        calendar = %input.calendar,
        gender = input.gender(),
        tz = input.tz(),
        "Computing saju chart"
    );

    let elements = element_counts();
    let strength_score = strength_from_elements(&elements);

    SajuResult {
        pillars: fixed_pillars(),
        ten_gods: BTreeMap::from([
            ("to_day".to_string(), "偏財".to_string()),
            ("to_month".to_string(), "正官".to_string()),
        ]),
        strength_score,
        elements,
        yongshin_candidates: yongshin_for_strength(strength_score),
        luck_timeline: luck_timeline(year),
    }
}

fn pillar(stem: &str, branch: &str, hidden: &[&str]) -> Pillar {
    Pillar {
        heavenly_stem: stem.to_string(),
        earthly_branch: branch.to_string(),
        hidden_stems: hidden.iter().map(|s| s.to_string()).collect(),
    }
}

fn fixed_pillars() -> BTreeMap<String, Pillar> {
    BTreeMap::from([
        ("year".to_string(), pillar("甲", "子", &["癸"])),
        ("month".to_string(), pillar("丙", "寅", &["甲", "丙", "戊"])),
        ("day".to_string(), pillar("辛", "巳", &["丙", "庚", "戊"])),
        ("hour".to_string(), pillar("壬", "午", &["丁", "己"])),
    ])
}

fn element_counts() -> BTreeMap<String, i32> {
    [("wood", 3), ("fire", 2), ("earth", 2), ("metal", 1), ("water", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Share of wood + water among ten element slots, rounded to 2 decimals.
pub fn strength_from_elements(elements: &BTreeMap<String, i32>) -> f64 {
    let supporting = elements.get("wood").copied().unwrap_or(0)
        + elements.get("water").copied().unwrap_or(0);
    round_places(f64::from(supporting) / 10.0, 2)
}

/// A strong day master wants fire/earth, a weak one wood/water.
pub fn yongshin_for_strength(strength: f64) -> Vec<String> {
    let picks: [&str; 2] = if strength > 0.5 {
        ["火", "土"]
    } else {
        ["木", "水"]
    };
    picks.iter().map(|s| s.to_string()).collect()
}

/// Two decades following the birth year.
pub fn luck_timeline(birth_year: i32) -> Vec<Luck> {
    vec![
        Luck {
            start_year: birth_year + 1,
            end_year: birth_year + LUCK_PERIOD_YEARS,
            tag: FortuneTag::Opportunity,
            notes: "전환기".to_string(),
        },
        Luck {
            start_year: birth_year + LUCK_PERIOD_YEARS + 1,
            end_year: birth_year + 2 * LUCK_PERIOD_YEARS,
            tag: FortuneTag::Neutral,
            notes: String::new(),
        },
    ]
}
