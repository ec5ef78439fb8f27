//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every gateway call produces:
//!     → logging (structured log events, slow-call warnings)
//!     → metrics.rs (call counters, latency histogram)
//!
//! Consumers:
//!     → Log output (stderr via tracing-subscriber)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Call ID flows through every event of a call via a span
//! - Metrics go through the `metrics` facade and cost nothing without a recorder

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, SLOW_CALL_TARGET};
