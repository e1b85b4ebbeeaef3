//! Request forwarding to the upstream.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the upstream URI
//! - Bound the whole exchange (connect, head, body) by one timeout
//! - Relay status, body and Content-Type back to the caller
//! - Map every failure to `502 Bad Gateway: {error}`

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use thiserror::Error;
use tokio::time;

use crate::config::{ForwardMode, ProxyConfig};
use crate::proxy::headers::forwardable_headers;
use crate::upstream::{describe, UpstreamClient, UpstreamError, UpstreamTarget};

/// Upstream reply as relayed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for ProxiedResponse {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Inbound body exceeded the configured limit.
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    /// Inbound body could not be read (client abort, malformed chunking).
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Bad Gateway: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

pub struct Forwarder {
    client: UpstreamClient,
    target: UpstreamTarget,
    mode: ForwardMode,
    timeout: Duration,
    max_body_bytes: usize,
    default_content_type: HeaderValue,
}

impl Forwarder {
    pub fn new(client: UpstreamClient, target: UpstreamTarget, config: &ProxyConfig) -> Self {
        let default_content_type = HeaderValue::from_str(&config.default_content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("text/html"));

        Self {
            client,
            target,
            mode: config.mode,
            timeout: Duration::from_secs(config.timeout_secs),
            max_body_bytes: config.max_body_bytes,
            default_content_type,
        }
    }

    pub fn mode(&self) -> ForwardMode {
        self.mode
    }

    /// Forward one inbound request and collect the upstream reply.
    pub async fn forward(&self, request: Request<Body>) -> Result<ProxiedResponse, ProxyError> {
        let outbound = self.build_request(request).await?;

        let exchange = async {
            let response = self
                .client
                .request(outbound)
                .await
                .map_err(UpstreamError::from_client)?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .cloned()
                .unwrap_or_else(|| self.default_content_type.clone());

            let body = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
                .await
                .map_err(|e| UpstreamError::Body(describe(&e)))?;

            Ok::<_, UpstreamError>(ProxiedResponse {
                status,
                content_type,
                body,
            })
        };

        match time::timeout(self.timeout, exchange).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(UpstreamError::Timeout(self.timeout).into()),
        }
    }

    async fn build_request(&self, request: Request<Body>) -> Result<Request<Body>, ProxyError> {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path();

        let (uri, headers, body) = match self.mode {
            ForwardMode::Minimal => (self.target.uri_for(path, None)?, None, Body::empty()),
            ForwardMode::Transparent => {
                if let Some(length) = content_length(&parts.headers) {
                    if length > self.max_body_bytes as u64 {
                        return Err(ProxyError::PayloadTooLarge(format!(
                            "{length} bytes exceeds limit of {}",
                            self.max_body_bytes
                        )));
                    }
                }
                let bytes = axum::body::to_bytes(body, self.max_body_bytes)
                    .await
                    .map_err(|e| inbound_body_error(&e))?;

                (
                    self.target.uri_for(path, parts.uri.query())?,
                    Some(forwardable_headers(&parts.headers)),
                    Body::from(bytes),
                )
            }
        };

        let mut outbound = Request::builder()
            .method(parts.method)
            .uri(uri)
            .body(body)
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        if let Some(headers) = headers {
            *outbound.headers_mut() = headers;
        }
        Ok(outbound)
    }
}

fn inbound_body_error(err: &(dyn StdError + 'static)) -> ProxyError {
    let mut cause = Some(err);
    while let Some(e) = cause {
        if e.is::<LengthLimitError>() {
            return ProxyError::PayloadTooLarge(describe(err));
        }
        cause = e.source();
    }
    ProxyError::BadRequest(describe(err))
}

fn content_length(headers: &header::HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
