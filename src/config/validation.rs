//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check cross-field ordering (request timeout outlives proxy timeout)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShimConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ShimConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.host must not be empty")]
    EmptyUpstreamHost,

    #[error("upstream.port must not be zero")]
    ZeroUpstreamPort,

    #[error("health_check.path must start with '/', got {0:?}")]
    RelativeHealthPath(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request}) must exceed proxy.timeout_secs ({proxy})")]
    RequestTimeoutTooShort { request: u64, proxy: u64 },

    #[error("proxy.default_content_type is not a valid header value: {0:?}")]
    InvalidContentType(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ShimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.upstream.host.trim().is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    }
    if config.upstream.port == 0 {
        errors.push(ValidationError::ZeroUpstreamPort);
    }

    if !config.health_check.path.starts_with('/') {
        errors.push(ValidationError::RelativeHealthPath(
            config.health_check.path.clone(),
        ));
    }

    for (field, secs) in [
        ("health_check.timeout_secs", config.health_check.timeout_secs),
        ("proxy.timeout_secs", config.proxy.timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.timeouts.request_secs <= config.proxy.timeout_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.timeouts.request_secs,
            proxy: config.proxy.timeout_secs,
        });
    }

    if HeaderValue::from_str(&config.proxy.default_content_type).is_err() {
        errors.push(ValidationError::InvalidContentType(
            config.proxy.default_content_type.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
