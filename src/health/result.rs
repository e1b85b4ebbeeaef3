//! The JSON document returned by `/health`.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::clock::format_timestamp;
use crate::upstream::{UpstreamError, UpstreamTarget};

/// Name reported in every health result.
pub const SERVICE_NAME: &str = "OpenClaw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// `SEAL` when the upstream answered 200, `VOID` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Seal,
    Void,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Seal => "SEAL",
            Verdict::Void => "VOID",
        }
    }
}

/// One probe outcome. Built fresh per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResult {
    pub status: HealthStatus,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
    pub verdict: Verdict,
}

impl HealthResult {
    pub fn healthy(target: &UpstreamTarget, at: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: SERVICE_NAME.to_string(),
            upstream: Some(target.authority()),
            error: None,
            timestamp: format_timestamp(at),
            verdict: Verdict::Seal,
        }
    }

    pub fn unhealthy(error: &UpstreamError, at: DateTime<Utc>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            service: SERVICE_NAME.to_string(),
            upstream: None,
            error: Some(error.to_string()),
            timestamp: format_timestamp(at),
            verdict: Verdict::Void,
        }
    }

    /// Outer HTTP status for this result.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
