//! The single upstream service and the ways talking to it can fail.
//!
//! # Responsibilities
//! - Hold the immutable upstream host/port
//! - Build upstream URIs for the prober and the forwarder
//! - Own the pooled HTTP client both of them share
//! - Classify transport failures into [`UpstreamError`]

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use axum::body::Body;
use axum::http::{StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

/// Pooled client used for every upstream call.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Build the shared upstream client.
pub fn build_client() -> UpstreamClient {
    let mut connector = HttpConnector::new();
    connector.set_nodelay(true);
    Client::builder(TokioExecutor::new()).build(connector)
}

/// Host and port of the upstream, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    host: String,
    port: u16,
}

impl UpstreamTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, as reported in healthy results.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `http://host:port/{path}` with an optional query.
    ///
    /// Leading slashes on `path` are collapsed so both `status` and `/status`
    /// map to `/status`; an empty path maps to the root.
    pub fn uri_for(&self, path: &str, query: Option<&str>) -> Result<Uri, UpstreamError> {
        let path = path.trim_start_matches('/');
        let mut uri = format!("http://{}/{}", self.authority(), path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            uri.push('?');
            uri.push_str(query);
        }
        uri.parse::<Uri>()
            .map_err(|e| UpstreamError::Request(format!("invalid upstream URI {uri:?}: {e}")))
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Why an upstream exchange did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Connection refused, DNS failure or another transport error.
    #[error("{0}")]
    Unreachable(String),

    #[error("upstream timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Upstream answered, but not with the status the health probe requires.
    #[error("Status {}", .0.as_u16())]
    BadStatus(StatusCode),

    /// The outbound request could not be constructed.
    #[error("invalid request: {0}")]
    Request(String),

    /// The upstream response body could not be read.
    #[error("failed to read upstream body: {0}")]
    Body(String),
}

impl UpstreamError {
    /// Classify a client error, keeping the full cause chain in the message.
    pub fn from_client(err: hyper_util::client::legacy::Error) -> Self {
        UpstreamError::Unreachable(describe(&err))
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable(_) => "unreachable",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::BadStatus(_) => "bad_status",
            UpstreamError::Request(_) => "request",
            UpstreamError::Body(_) => "body",
        }
    }
}

/// Render an error and its sources as `outer: inner: root`.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
