//! Structured logging.
//!
//! Uses `tracing` with a `tracing-subscriber` registry. `RUST_LOG` wins;
//! otherwise the configured level applies to this crate and `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("openclaw_shim={level},tower_http={level}")
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
