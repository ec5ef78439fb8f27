//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Name the target used for slow-call diagnostics
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Target of the single warning emitted for a call slower than the threshold.
pub const SLOW_CALL_TARGET: &str = "ml_gateway::slow_call";

/// Install the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

fn default_filter(level: &str) -> String {
    format!("ml_gateway={},reqwest=warn", level.to_ascii_lowercase())
}
