//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional --config file (TOML)
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → validation.rs (semantic checks)
//!     → ShimConfig (validated, immutable)
//!     → handed to ShimServer::new at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults, so no file at all reproduces the stock deployment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    ForwardMode, HealthCheckConfig, ListenerConfig, ObservabilityConfig, ProxyConfig,
    ShimConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
