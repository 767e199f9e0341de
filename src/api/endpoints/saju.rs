//! Saju chart endpoint.

use axum::Json;

use crate::models::{SajuInput, SajuResult};
use crate::saju::compute_saju;

/// `POST /v1/saju/compute`: stubbed four-pillar chart.
///
/// Never fails on a bad `birth_ts`; the chart falls back to 1990.
pub async fn compute(Json(input): Json<SajuInput>) -> Json<SajuResult> {
    Json(compute_saju(&input))
}
