//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shim.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults matching the stock OpenClaw deployment.

use serde::{Deserialize, Serialize};

use crate::upstream::UpstreamTarget;

/// Root configuration for the shim.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ShimConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single upstream service the shim fronts.
    pub upstream: UpstreamConfig,

    /// Health probe settings.
    pub health_check: HealthCheckConfig,

    /// Forwarding settings.
    pub proxy: ProxyConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ShimConfig {
    /// The immutable upstream target derived from this configuration.
    pub fn upstream_target(&self) -> UpstreamTarget {
        UpstreamTarget::new(self.upstream.host.clone(), self.upstream.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
        }
    }
}

/// Upstream host and port.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    pub host: String,
    pub port: u16,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: "openclaw".to_string(),
            port: 18789,
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Path probed on the upstream.
    pub path: String,

    /// Probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            timeout_secs: 5,
        }
    }
}

/// What parts of the inbound request travel to the upstream.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForwardMode {
    /// Method, path, query, end-to-end headers and body.
    #[default]
    Transparent,
    /// Method and path only.
    Minimal,
}

/// Forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    pub mode: ForwardMode,

    /// Upstream timeout in seconds (connect + response + body).
    pub timeout_secs: u64,

    /// Largest inbound body buffered for forwarding.
    pub max_body_bytes: usize,

    /// Content-Type relayed when the upstream sends none.
    pub default_content_type: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mode: ForwardMode::Transparent,
            timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            default_content_type: "text/html".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for handling one inbound request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
