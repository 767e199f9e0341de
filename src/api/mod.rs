//! HTTP API for the Oasis fortune service.
//!
//! Routes:
//! - `GET /`: health
//! - `POST /v1/saju/compute`: stubbed birth chart
//! - `POST /v1/face/extract`: photo statistics and traits
//! - `POST /v1/report/compose`: templated report
//! - `GET /client/*`: static mini-app, when the directory exists
//!
//! The router is composable: `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer, ServerSession};
pub use types::ApiContext;
