//! Configuration management

use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Bot server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path for profiles
    pub db_path: PathBuf,

    /// Pharmacy dataset (CSV) path
    pub pharmacy_csv_path: PathBuf,

    /// Directory served under /video (onboarding media)
    pub media_dir: PathBuf,

    /// Webhook bind address
    pub bind_addr: IpAddr,

    /// Webhook port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let db_path = std::env::var("SAMPARK_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("sampark")
                    .join("sampark.db")
            });

        let pharmacy_csv_path = std::env::var("SAMPARK_PHARMACY_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pharmacies_with_dosages.csv"));

        let media_dir = std::env::var("SAMPARK_MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let bind_addr = std::env::var("SAMPARK_BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let port = std::env::var("SAMPARK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5050);

        Ok(Self {
            db_path,
            pharmacy_csv_path,
            media_dir,
            bind_addr,
            port,
        })
    }

    /// Webhook socket address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
