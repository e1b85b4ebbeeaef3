//! OpenClaw health-check and reverse-proxy shim.
//!
//! Exposes `GET /health`, which probes the upstream once and reports a
//! `SEAL`/`VOID` verdict, and forwards every other request to the same
//! upstream, relaying status, body and Content-Type.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod upstream;

pub use config::ShimConfig;
pub use http::ShimServer;
pub use lifecycle::Shutdown;
pub use upstream::{UpstreamError, UpstreamTarget};
