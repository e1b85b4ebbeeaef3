//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health and catch-all proxy handlers
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Bind server to listener and serve until shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ShimConfig;
use crate::health::HealthProber;
use crate::observability::metrics;
use crate::proxy::Forwarder;
use crate::upstream::build_client;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub prober: Arc<HealthProber>,
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    /// Build the prober and forwarder over one shared upstream client.
    pub fn from_config(config: &ShimConfig) -> Self {
        let client = build_client();
        let target = config.upstream_target();

        Self {
            prober: Arc::new(HealthProber::new(
                client.clone(),
                target.clone(),
                &config.health_check,
            )),
            forwarder: Arc::new(Forwarder::new(client, target, &config.proxy)),
        }
    }
}

/// HTTP server for the shim.
pub struct ShimServer {
    router: Router,
    config: ShimConfig,
}

impl ShimServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ShimConfig) -> Self {
        let state = AppState::from_config(&config);
        Self::with_state(config, state)
    }

    /// Create a server around prepared state (e.g. a prober with a custom clock).
    pub fn with_state(config: ShimConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream_target(),
            mode = ?self.config.proxy.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShimConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ShimConfig, state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", any(proxy_handler))
        .route("/{*path}", any(proxy_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// `GET /health`: probe the upstream and report SEAL or VOID.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let result = state.prober.check().await;
    (result.http_status(), Json(result))
}

/// Catch-all handler: forward to the upstream and relay its reply.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Proxying request"
    );

    let response = match state.forwarder.forward(request).await {
        Ok(proxied) => {
            tracing::debug!(
                request_id = %request_id,
                status = %proxied.status,
                bytes = proxied.body.len(),
                "Upstream responded"
            );
            proxied.into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Upstream request failed"
            );
            e.into_response()
        }
    };

    metrics::record_proxy_request(method.as_str(), response.status().as_u16(), start_time);
    response
}
