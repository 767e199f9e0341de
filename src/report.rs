//! Report composition from a saju chart and a face result.
//!
//! The summary and the first actions depend on a single template pick:
//!
//! | clarity | quality | template    |
//! |---------|---------|-------------|
//! | ≥ 0.70  | ≥ 0.65  | opportunity |
//! | any     | < 0.45  | caution     |
//! | else    |         | neutral     |
//!
//! Sections and the disclaimer are fixed text.

use std::collections::{BTreeMap, HashSet};

use crate::models::{ComposeInput, FortuneTag, Report};

pub const OPPORTUNITY_MIN_CLARITY: f64 = 0.7;
pub const OPPORTUNITY_MIN_QUALITY: f64 = 0.65;
pub const CAUTION_MAX_QUALITY: f64 = 0.45;

/// Clarity assumed when the face result carries no `clarity` trait.
pub const DEFAULT_CLARITY: f64 = 0.5;

const OPPORTUNITY_SUMMARY: &str =
    "흐름이 열리는 시기입니다. 준비해 둔 계획을 실행에 옮기고 기회를 적극적으로 잡으세요.";
const CAUTION_SUMMARY: &str =
    "변동성이 큰 시기입니다. 새로운 확장보다는 현금과 체력을 비축하며 기반을 다지세요.";
const NEUTRAL_SUMMARY: &str =
    "타이밍이 중요한 전환기입니다. 무리한 확장은 피하고 준비된 기회를 노리세요.";

const OPPORTUNITY_ACTIONS: [&str; 2] = ["핵심 파트너와 월 1회 리뷰", "보류 중인 제안 1건 이번 달 실행"];
const CAUTION_ACTIONS: [&str; 2] = ["지출 상위 2개 항목 15% 절감", "신규 계약은 2주 검토 후 서명"];
const NEUTRAL_ACTIONS: [&str; 1] = ["핵심 파트너와 월 1회 리뷰"];
const UNIVERSAL_ACTIONS: [&str; 2] = ["지출 상위 2개 항목 15% 절감", "주 2회 30분 유산소"];

const SECTIONS: [(&str, &str); 5] = [
    ("성격", "주도성과 신중함이 공존하는 편. 팀 내에서 조율자 역할이 어울립니다."),
    ("대인관계", "초반 경계심이 있으나 신뢰 형성 후 강한 결속을 보입니다."),
    ("사업", "상반기에는 파트너십 위주, 하반기에는 자체 브랜드 강화가 유리합니다."),
    ("재물", "지출 카테고리 1~2개를 축소해 현금을 비축하세요."),
    ("건강", "수면 리듬 관리와 간단한 유산소 운동을 권장합니다."),
];

pub const DISCLAIMER: &str = "본 결과는 참고용이며, 의료·법률·재무 판단의 근거가 아닙니다.";

/// Pick the report template. First matching rule wins.
pub fn select_template(clarity: f64, quality: f64) -> FortuneTag {
    if clarity >= OPPORTUNITY_MIN_CLARITY && quality >= OPPORTUNITY_MIN_QUALITY {
        FortuneTag::Opportunity
    } else if quality < CAUTION_MAX_QUALITY {
        FortuneTag::Caution
    } else {
        FortuneTag::Neutral
    }
}

fn template_text(tag: FortuneTag) -> (&'static str, &'static [&'static str]) {
    match tag {
        FortuneTag::Opportunity => (OPPORTUNITY_SUMMARY, &OPPORTUNITY_ACTIONS),
        FortuneTag::Caution => (CAUTION_SUMMARY, &CAUTION_ACTIONS),
        FortuneTag::Neutral => (NEUTRAL_SUMMARY, &NEUTRAL_ACTIONS),
    }
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(Into::into)
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Build a report from explicit clarity and quality scores.
pub fn compose_from_scores(clarity: f64, quality: f64) -> Report {
    let tag = select_template(clarity, quality);
    let (summary, actions) = template_text(tag);

    tracing::debug!(clarity, quality, template = %tag, "Report template selected");

    Report {
        summary: summary.to_string(),
        sections: SECTIONS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        actions: dedup_preserving_order(actions.iter().chain(UNIVERSAL_ACTIONS.iter()).copied()),
        disclaimer: DISCLAIMER.to_string(),
    }
}

/// Compose the `/v1/report/compose` response.
///
/// Clarity comes from the face traits and quality from the face result.
/// The saju chart, goal and locale do not change the text.
pub fn compose_report(input: &ComposeInput) -> Report {
    let clarity = input
        .face
        .traits
        .get("clarity")
        .copied()
        .unwrap_or(DEFAULT_CLARITY);
    compose_from_scores(clarity, input.face.quality)
}
