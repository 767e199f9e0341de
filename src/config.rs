use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Application-level constants
pub const APP_NAME: &str = "Oasis Fortune API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request body / decoded image limit (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "oasis_fortune_lib=info,oasis_fortune=info,tower_http=warn"
}

/// Server settings, parsed once at startup from flags or environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "oasis-fortune", version, about = "Oasis Fortune API server", long_about = None)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "OASIS_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind. 0 picks an ephemeral port.
    #[arg(long, env = "OASIS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory served under `/client`. Skipped when missing.
    #[arg(long, env = "OASIS_CLIENT_DIR", default_value = "client", value_name = "DIR")]
    pub client_dir: PathBuf,

    /// Maximum request body size, also applied to decoded images.
    #[arg(long, env = "OASIS_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES, value_name = "BYTES")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            client_dir: PathBuf::from("client"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
