use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub negotiation: NegotiationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Largest request body read while decoding a representation, measured after decompression
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: ByteSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Content negotiation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NegotiationConfig {
    /// Accept header assumed when a request carries none
    #[serde(default = "default_accept")]
    pub default_accept: String,
    /// Media ranges the message resource is registered under
    #[serde(default = "default_media_ranges")]
    pub media_ranges: Vec<String>,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            default_accept: default_accept(),
            media_ranges: default_media_ranges(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_body_bytes() -> ByteSize {
    ByteSize(1024 * 1024) // 1 MB
}

fn default_accept() -> String {
    "*/*".to_string()
}

fn default_media_ranges() -> Vec<String> {
    [
        "application/json",
        "application/vnd.message.v1+json",
        "text/plain",
        "*/*",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.max_body_bytes.as_u64(), 1024 * 1024);
        assert_eq!(config.negotiation.default_accept, "*/*");
        assert_eq!(config.negotiation.media_ranges.len(), 4);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
[negotiation]
default_accept = "application/json"
            "#,
        )
        .unwrap();

        assert_eq!(config.negotiation.default_accept, "application/json");
        assert_eq!(config.negotiation.media_ranges, default_media_ranges());
        assert_eq!(config.server.bind_addr, default_bind_addr());
    }
}
