//! Health check endpoint.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::{APP_NAME, APP_VERSION};

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
    /// Current UTC time, RFC 3339 with a `Z` suffix.
    pub now: String,
}

/// `GET /`: liveness check.
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: APP_NAME,
        version: APP_VERSION,
        now: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
