//! Server configuration
//!
//! Read from the process environment (after `.env` is loaded by `main`).
//!
//! - `ARMADA_LISTEN_ADDR`: socket address to bind, default `0.0.0.0:8080`
//! - `ARMADA_API_KEY`: bearer token required on `/v1/*`; unset or empty disables auth

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ARMADA_LISTEN_ADDR {value:?}: {reason}")]
    InvalidListenAddr { value: String, reason: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("ARMADA_LISTEN_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidListenAddr {
                value: raw_addr.clone(),
                reason: e.to_string(),
            })?;

        let api_key = lookup("ARMADA_API_KEY").filter(|k| !k.is_empty());

        Ok(Self {
            listen_addr,
            api_key,
        })
    }
}
