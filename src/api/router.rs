//! Oasis API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Layer stack (outermost → innermost):
//! 1. Access log → 2. CORS → 3. Body limit → 4. Handlers
//!
//! API routes additionally carry `Cache-Control: no-store`. Static files
//! under `/client` do not.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::ServerConfig;

/// Build the Oasis API router from startup configuration.
pub fn api_router(config: Arc<ServerConfig>) -> Router {
    build_router(ApiContext::new(config))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/", get(endpoints::health::root))
        .route("/v1/saju/compute", post(endpoints::saju::compute))
        .route("/v1/face/extract", post(endpoints::face::extract))
        .route("/v1/report/compose", post(endpoints::report::compose))
        .with_state(ctx.clone())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let client_dir = &ctx.config.client_dir;
    let router = if client_dir.is_dir() {
        tracing::info!(dir = %client_dir.display(), "Serving static client under /client");
        api.nest_service("/client", ServeDir::new(client_dir))
    } else {
        tracing::info!(
            dir = %client_dir.display(),
            "Client directory not found, /client disabled"
        );
        api
    };

    router
        .layer(DefaultBodyLimit::max(ctx.config.max_body_bytes))
        .layer(middleware::cors_layer())
        .layer(axum::middleware::from_fn(middleware::access_log::log_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use base64::Engine;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::face::test_support::{checkerboard, png_bytes, solid_png_base64};

    fn test_config() -> Arc<ServerConfig> {
        Arc::new(ServerConfig {
            client_dir: PathBuf::from("/nonexistent/oasis-client"),
            ..ServerConfig::default()
        })
    }

    fn test_router() -> Router {
        api_router(test_config())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    // ── Health ──────────────────────────────────────────────

    #[tokio::test]
    async fn root_reports_ok_with_utc_timestamp() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "no-store"
        );

        let json = response_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["service"], "Oasis Fortune API");
        let now = json["now"].as_str().unwrap();
        assert!(now.ends_with('Z'), "expected UTC suffix: {now}");
        let parsed = chrono::DateTime::parse_from_rfc3339(now).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        let id = response.headers().get("x-request-id").unwrap();
        assert!(!id.is_empty());

        let req = Request::builder()
            .uri("/")
            .header("X-Request-Id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let req = Request::builder().uri("/v1/nothing").body(Body::empty()).unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn client_disabled_without_directory() {
        let req = Request::builder()
            .uri("/client/index.html")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn client_directory_is_served() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("index.html"), "<h1>oasis</h1>").unwrap();
        std::fs::write(tmp.path().join("app.js"), "console.log(1)").unwrap();
        let config = Arc::new(ServerConfig {
            client_dir: tmp.path().to_path_buf(),
            ..ServerConfig::default()
        });
        let router = api_router(config);

        let req = Request::builder().uri("/client/app.js").body(Body::empty()).unwrap();
        let response = router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("Cache-Control").is_none());

        let req = Request::builder().uri("/client/").body(Body::empty()).unwrap();
        let response = router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"<h1>oasis</h1>");
    }

    // ── CORS ────────────────────────────────────────────────

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/v1/face/extract")
            .header("Origin", "https://example.org")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert!(response
            .headers()
            .get("access-control-allow-credentials")
            .is_none());
    }

    #[tokio::test]
    async fn cors_header_on_simple_request() {
        let req = Request::builder()
            .uri("/")
            .header("Origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    // ── Saju ────────────────────────────────────────────────

    #[tokio::test]
    async fn saju_compute_response_shape() {
        let req = post_json(
            "/v1/saju/compute",
            json!({"birth_ts": "1988-08-08T08:08:00Z", "calendar": "lunar", "gender": "f"}),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["pillars"]["day"]["heavenly_stem"], "辛");
        assert_eq!(json["strength_score"], 0.5);
        assert_eq!(json["elements"]["metal"], 1);
        assert_eq!(json["luck_timeline"][0]["start_year"], 1989);
        assert_eq!(json["luck_timeline"][0]["tag"], "opportunity");
        assert_eq!(json["luck_timeline"][1]["end_year"], 2008);
        assert_eq!(json["yongshin_candidates"], json!(["木", "水"]));
    }

    #[tokio::test]
    async fn saju_bad_timestamp_defaults_year() {
        let req = post_json(
            "/v1/saju/compute",
            json!({"birth_ts": "sometime in spring", "calendar": "solar"}),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["luck_timeline"][0]["start_year"], 1991);
    }

    #[tokio::test]
    async fn saju_accepts_unknown_calendar() {
        let req = post_json(
            "/v1/saju/compute",
            json!({"birth_ts": "1990-01-01", "calendar": "gregorian"}),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["luck_timeline"][0]["start_year"], 1991);
    }

    #[tokio::test]
    async fn saju_null_optionals_fall_back() {
        let req = post_json(
            "/v1/saju/compute",
            json!({
                "birth_ts": "1990-01-01",
                "calendar": "solar",
                "gender": null,
                "tz": null,
                "place": null,
            }),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["pillars"].as_object().unwrap().len(), 4);
    }

    // ── Face ────────────────────────────────────────────────

    #[tokio::test]
    async fn face_extract_blank_image_is_neutral() {
        let req = post_json("/v1/face/extract", json!({"image_base64": ""}));
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["quality"], 0.5);
        assert_eq!(
            json["features"],
            json!({"img_w": 0.0, "img_h": 0.0, "brightness": 0.5, "sharpness": 0.5})
        );
        assert_eq!(json["regions"], json!({}));
        assert_eq!(json["traits"]["stability"], 0.8);
        assert_eq!(json["traits"].as_object().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn face_extract_decodes_data_url() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(checkerboard(8, 8)));
        let req = post_json(
            "/v1/face/extract",
            json!({"image_base64": format!("data:image/png;base64,{encoded}")}),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["features"]["img_w"], 8.0);
        assert_eq!(json["features"]["brightness"], 0.5);
        assert_eq!(json["features"]["sharpness"], 0.75);
        assert_eq!(json["quality"], 0.575);
        assert_eq!(json["traits"]["clarity"], 0.7);
    }

    #[tokio::test]
    async fn face_extract_rejects_non_image_bytes() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"plain text, not pixels");
        let req = post_json("/v1/face/extract", json!({"image_base64": encoded}));
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_IMAGE");
    }

    #[tokio::test]
    async fn face_extract_requires_field() {
        let req = post_json("/v1/face/extract", json!({}));
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn body_limit_is_enforced() {
        let config = Arc::new(ServerConfig {
            client_dir: PathBuf::from("/nonexistent/oasis-client"),
            max_body_bytes: 256,
            ..ServerConfig::default()
        });
        let req = post_json("/v1/face/extract", json!({"image_base64": "A".repeat(1024)}));
        let response = api_router(config).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn face_extract_rejects_large_dimensions() {
        let config = Arc::new(ServerConfig {
            client_dir: PathBuf::from("/nonexistent/oasis-client"),
            max_body_bytes: 8192,
            ..ServerConfig::default()
        });
        let router = api_router(config);

        // A flat 400x400 PNG is a couple of KB but decodes to 480000 bytes.
        let payload = solid_png_base64(400, 400, [128, 128, 128]);
        assert!(payload.len() < 8192);
        let req = post_json("/v1/face/extract", json!({"image_base64": payload}));
        let response = router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(json["error"]["message"].as_str().unwrap().contains("480000"));

        // 40x40 decodes to 4800 bytes, under the same limit.
        let req = post_json(
            "/v1/face/extract",
            json!({"image_base64": solid_png_base64(40, 40, [128, 128, 128])}),
        );
        let response = router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn face_extract_small_png_within_limit() {
        let req = post_json(
            "/v1/face/extract",
            json!({"image_base64": solid_png_base64(16, 16, [255, 255, 255])}),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["features"]["brightness"], 1.0);
        assert_eq!(json["traits"]["sociality"], 0.7);
    }

    // ── Report ──────────────────────────────────────────────

    #[tokio::test]
    async fn report_compose_opportunity() {
        let req = post_json(
            "/v1/report/compose",
            json!({
                "saju": {"pillars": {}},
                "face": {"quality": 0.7, "traits": {"clarity": 0.8}},
            }),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert!(json["summary"].as_str().unwrap().contains("기회"));
        assert_eq!(json["sections"].as_object().unwrap().len(), 5);
        assert_eq!(json["actions"].as_array().unwrap().len(), 4);
        assert!(json["disclaimer"].is_string());
    }

    #[tokio::test]
    async fn report_compose_caution_dedups_actions() {
        let req = post_json(
            "/v1/report/compose",
            json!({
                "saju": {"pillars": {}},
                "face": {"quality": 0.3, "traits": {"clarity": 0.5}},
                "goal": "career",
                "locale": "en-US",
            }),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let actions: Vec<&str> = json["actions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0], "지출 상위 2개 항목 15% 절감");
    }

    #[tokio::test]
    async fn report_compose_null_goal_and_locale() {
        let req = post_json(
            "/v1/report/compose",
            json!({
                "saju": {"pillars": {}},
                "face": {"quality": 0.5},
                "goal": null,
                "locale": null,
            }),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert!(json["summary"].as_str().unwrap().starts_with("타이밍이 중요한"));
    }

    #[tokio::test]
    async fn face_then_report_round_trip() {
        // Output of /v1/face/extract is valid input for /v1/report/compose.
        let router = test_router();
        let face = response_json(
            router
                .clone()
                .oneshot(post_json("/v1/face/extract", json!({"image_base64": ""})))
                .await
                .unwrap(),
        )
        .await;
        let saju = response_json(
            router
                .clone()
                .oneshot(post_json(
                    "/v1/saju/compute",
                    json!({"birth_ts": "1990-01-01", "calendar": "solar"}),
                ))
                .await
                .unwrap(),
        )
        .await;

        let response = router
            .oneshot(post_json("/v1/report/compose", json!({"saju": saju, "face": face})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        // Neutral photo: clarity 0.5, quality 0.5.
        assert!(json["summary"].as_str().unwrap().starts_with("타이밍이 중요한"));
    }
}
