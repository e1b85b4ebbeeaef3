//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → prober.rs (one GET to the upstream, bounded by timeout)
//!     → result.rs (healthy/SEAL or unhealthy/VOID document)
//!     → clock.rs (non-decreasing UTC timestamp)
//!     → JSON response, 200 or 503
//! ```
//!
//! # Design Decisions
//! - Probing is on demand; there is no background monitor
//! - No retries and no state carried between probes

pub mod clock;
pub mod prober;
pub mod result;

pub use clock::{Clock, MonotonicClock, SystemClock};
pub use prober::HealthProber;
pub use result::{HealthResult, HealthStatus, Verdict, SERVICE_NAME};
