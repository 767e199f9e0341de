//! Shared types for the HTTP layer.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared context for all API routes and middleware.
///
/// Built once at startup and cloned into every handler. Holds only
/// read-only settings: requests share no mutable state.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<ServerConfig>,
}

impl ApiContext {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }

    /// Upper bound for a decoded photo's RGB pixel buffer, in bytes.
    pub fn max_image_bytes(&self) -> usize {
        self.config.max_body_bytes
    }
}

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
