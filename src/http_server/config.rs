//! HTTP Server Configuration
//!
//! Host, port, CORS and request size settings.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Largest accepted request body, attachments included (default: 100MB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    100 * 1024 * 1024
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.max_body_bytes, 100 << 20);
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(9090);
        assert_eq!(config.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 3000}"#).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
    }
}
