//! Report composition endpoint.

use axum::Json;

use crate::models::{ComposeInput, Report};
use crate::report::compose_report;

/// `POST /v1/report/compose`: templated report from saju + face results.
pub async fn compose(Json(input): Json<ComposeInput>) -> Json<Report> {
    tracing::debug!(goal = input.goal(), locale = input.locale(), "Composing report");
    Json(compose_report(&input))
}
