//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (thresholds > 0, image sizes > 0)
//! - Check that the web services base URL is usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "client.user_agent").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.client.slow_call_threshold_ms == 0 {
        errors.push(ValidationError::new(
            "client.slow_call_threshold_ms",
            "must be greater than zero",
        ));
    }

    if config.client.connect_timeout_ms == Some(0) {
        errors.push(ValidationError::new(
            "client.connect_timeout_ms",
            "must be greater than zero when set",
        ));
    }

    if config.client.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("client.user_agent", "must not be empty"));
    }

    match Url::parse(&config.webservices.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "webservices.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "webservices.base_url",
            format!("invalid URL '{}': {}", config.webservices.base_url, e),
        )),
    }

    if config.webservices.image_width == 0 || config.webservices.image_height == 0 {
        errors.push(ValidationError::new(
            "webservices.image_width/image_height",
            "image dimensions must be greater than zero",
        ));
    }

    if config.webservices.structure_data_width == 0 || config.webservices.structure_data_height == 0 {
        errors.push(ValidationError::new(
            "webservices.structure_data_width/structure_data_height",
            "image dimensions must be greater than zero",
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
