//! On-demand upstream health probing.
//!
//! # Responsibilities
//! - Issue one bounded GET to the upstream per `/health` request
//! - Classify the outcome as SEAL (status 200) or VOID (anything else)
//! - Stamp the result with a non-decreasing UTC timestamp

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::clock::{Clock, MonotonicClock, SystemClock};
use crate::health::result::HealthResult;
use crate::observability::metrics;
use crate::upstream::{UpstreamClient, UpstreamError, UpstreamTarget};

pub struct HealthProber {
    client: UpstreamClient,
    target: UpstreamTarget,
    path: String,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl HealthProber {
    pub fn new(client: UpstreamClient, target: UpstreamTarget, config: &HealthCheckConfig) -> Self {
        Self {
            client,
            target,
            path: config.path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            clock: Arc::new(MonotonicClock::new(SystemClock)),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Probe the upstream once and build the `/health` document.
    pub async fn check(&self) -> HealthResult {
        let started = Instant::now();
        let outcome = self.probe().await;
        let now = self.clock.now();

        let result = match outcome {
            Ok(()) => {
                tracing::debug!(upstream = %self.target, "Health check passed");
                HealthResult::healthy(&self.target, now)
            }
            Err(ref e) => {
                tracing::warn!(
                    upstream = %self.target,
                    kind = e.kind(),
                    error = %e,
                    "Health check failed"
                );
                HealthResult::unhealthy(e, now)
            }
        };

        metrics::record_health_check(result.verdict, started);
        result
    }

    /// Single attempt; only an exact 200 counts as healthy.
    async fn probe(&self) -> Result<(), UpstreamError> {
        let uri = self.target.uri_for(&self.path, None)?;
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::USER_AGENT, "openclaw-shim-health-check")
            .body(Body::empty())
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) if response.status() == StatusCode::OK => Ok(()),
            Ok(Ok(response)) => Err(UpstreamError::BadStatus(response.status())),
            Ok(Err(e)) => Err(UpstreamError::from_client(e)),
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        }
    }
}
