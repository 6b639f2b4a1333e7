//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Initialize tracing for the embedding process.
///
/// `RUST_LOG` wins over the configured filter. Safe to call more than once;
/// later calls are no-ops.
pub fn init(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = if server.json_logs {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
    } else {
        builder.try_init()
    };
}
