//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span, request timeout)
//!     → GET /health  → health::HealthProber
//!     → ANY /{path}  → proxy::Forwarder
//!     → Send to client
//! ```

pub mod server;

pub use server::{build_router, AppState, ShimServer};
