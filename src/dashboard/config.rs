//! Dashboard configuration
//!
//! Localhost binding by default; anything else logs a warning since the
//! dashboard exposes patient data and carries no auth layer of its own.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Dashboard server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Bind address (default: 127.0.0.1)
    pub bind_addr: IpAddr,
    /// Port number (default: 8080)
    pub port: u16,
    /// Enable CORS (restricted to localhost origins)
    pub cors_enabled: bool,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Enable request logging
    pub log_requests: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            cors_enabled: true,
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
            log_requests: true,
        }
    }
}

impl DashboardConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("DASHBOARD_BIND_ADDR") {
            if let Ok(parsed) = addr.parse() {
                config.bind_addr = parsed;
            }
        }

        if let Ok(port) = std::env::var("DASHBOARD_PORT") {
            if let Ok(parsed) = port.parse() {
                config.port = parsed;
            }
        }

        if let Ok(val) = std::env::var("DASHBOARD_LOG_REQUESTS") {
            config.log_requests = val == "true" || val == "1";
        }

        if !config.is_localhost() {
            tracing::warn!(
                "Dashboard binding to {} - patient data will be reachable on the network",
                config.bind_addr
            );
        }

        config
    }

    /// Check if bound to localhost only
    pub fn is_localhost(&self) -> bool {
        match self.bind_addr {
            IpAddr::V4(addr) => addr.is_loopback(),
            IpAddr::V6(addr) => addr.is_loopback(),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Get the base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.bind_addr, self.port)
    }
}
