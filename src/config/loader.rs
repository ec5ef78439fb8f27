//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `webservices.base_url`.
pub const JCWS_URL_ENV: &str = "JCWSURL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied before validation.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the configuration used when no file is given: defaults plus environment overrides.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from a variable lookup (normally the process environment).
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(JCWS_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!(base_url = %url, "Web services base URL overridden from environment");
        config.webservices.base_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let path = std::env::temp_dir().join(format!("ml-gateway-{}-{}.toml", name, nanos));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == JCWS_URL_ENV).then(|| "http://jws.internal:8080/webservices/".to_string())
        });
        assert_eq!(config.webservices.base_url, "http://jws.internal:8080/webservices/");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.webservices.base_url, "http://localhost:8080/webservices/");
    }

    #[test]
    fn test_load_config_from_file() {
        let path = scratch_file("ok", "[client]\nslow_call_threshold_ms = 750\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.client.slow_call_threshold_ms, 750);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_config_reports_validation_errors() {
        let path = scratch_file("invalid", "[client]\nslow_call_threshold_ms = 0\n");
        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors[0].field, "client.slow_call_threshold_ms");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let path = scratch_file("garbled", "[client\n");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("ml-gateway-does-not-exist.toml");
        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }
}
