//! Face feature endpoint: photo statistics and derived traits.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::face::extract_face;
use crate::models::{FaceInput, FaceResult};

/// `POST /v1/face/extract`: decode the photo and score it.
///
/// Decoding and filtering are CPU-bound, so they run on the blocking pool.
/// Blank payloads yield neutral scores; bytes that are not an image
/// return 400 `INVALID_IMAGE`, and images whose pixel buffer would exceed
/// the body limit return 413 before decoding.
pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(input): Json<FaceInput>,
) -> Result<Json<FaceResult>, ApiError> {
    let max_bytes = ctx.max_image_bytes();
    let payload_len = input.image_base64.len();

    let result = tokio::task::spawn_blocking(move || extract_face(&input.image_base64, max_bytes))
        .await??;

    tracing::info!(
        payload_len,
        quality = result.quality,
        "Face features extracted"
    );

    Ok(Json(result))
}
