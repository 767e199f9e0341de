//! HTTP middleware.
//!
//! - `access_log`: request id + one structured log line per request
//! - `cors_layer`: permissive CORS for the browser mini-app

pub mod access_log;

use tower_http::cors::{Any, CorsLayer};

/// Any origin, method and header; credentials disabled.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
}
