//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Slow-call threshold used when the config file does not set one.
pub const DEFAULT_SLOW_CALL_THRESHOLD_MS: u64 = 2000;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Outbound HTTP client settings.
    pub client: ClientConfig,

    /// JChem Web Services endpoint settings.
    pub webservices: WebServicesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Calls slower than this are flagged in the logs (not treated as errors).
    pub slow_call_threshold_ms: u64,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,

    /// User-Agent header sent on every request.
    pub user_agent: String,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            slow_call_threshold_ms: DEFAULT_SLOW_CALL_THRESHOLD_MS,
            connect_timeout_ms: None,
            user_agent: concat!("ml-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// JChem Web Services configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebServicesConfig {
    /// Base URL of the web services deployment (e.g., "http://localhost:8080/webservices/").
    pub base_url: String,

    /// Default width of rendered JPEG images and image URLs.
    pub image_width: u32,

    /// Default height of rendered JPEG images and image URLs.
    pub image_height: u32,

    /// Default width of inline PNG images.
    pub structure_data_width: u32,

    /// Default height of inline PNG images.
    pub structure_data_height: u32,
}

impl Default for WebServicesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/webservices/".to_string(),
            image_width: 280,
            image_height: 150,
            structure_data_width: 400,
            structure_data_height: 260,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
