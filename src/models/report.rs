use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::face::FaceResult;
use super::saju::SajuResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: String,
    pub sections: BTreeMap<String, String>,
    pub actions: Vec<String>,
    pub disclaimer: String,
}

pub const DEFAULT_GOAL: &str = "business";
pub const DEFAULT_LOCALE: &str = "ko-KR";

/// Body of `POST /v1/report/compose`. `goal` and `locale` may be absent
/// or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeInput {
    pub saju: SajuResult,
    pub face: FaceResult,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl ComposeInput {
    pub fn goal(&self) -> &str {
        self.goal.as_deref().unwrap_or(DEFAULT_GOAL)
    }

    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }
}
