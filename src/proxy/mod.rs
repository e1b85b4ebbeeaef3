//! Transparent forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ANY /{path}
//!     → headers.rs (strip hop-by-hop headers, transparent mode only)
//!     → forward.rs (rebuild request, single attempt, bounded by timeout)
//!     → upstream status + body + Content-Type, or 502 Bad Gateway
//! ```

pub mod forward;
pub mod headers;

pub use forward::{Forwarder, ProxiedResponse, ProxyError};
