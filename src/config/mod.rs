//! Configuration management for conneg
//!
//! Settings are layered from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use conneg::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `CONNEG__<section>__<key>`:
//! - `CONNEG__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `CONNEG__SERVER__MAX_BODY_BYTES=2MB`
//! - `CONNEG__NEGOTIATION__MEDIA_RANGES=application/json,text/plain`
//!
//! # Configuration File
//!
//! The file is read from `config/conneg.toml` unless `CONNEG_CONFIG` points
//! elsewhere.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{Config, NegotiationConfig, ServerConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or a
    /// negotiation setting does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("conneg.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:8081"
max_body_bytes = "2MB"

[negotiation]
default_accept = "application/vnd.message.v1+json, */*;q=0.5"
media_ranges = ["application/vnd.message.v1+json", "*/*"]
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.max_body_bytes, ByteSize(2 * 1024 * 1024));
        assert_eq!(config.negotiation.media_ranges.len(), 2);
    }

    #[test]
    fn test_validation_catches_bad_default_accept() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("conneg.toml");

        let toml_content = r#"
[negotiation]
default_accept = "application/json;q=high"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidDefaultAccept { .. })
        ));
    }
}
