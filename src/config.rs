use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

// --- Environment variables ---
const LISTEN_ADDR_ENV_VAR: &str = "NOTED_LISTEN_ADDR";
const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
const STATIC_DIR_ENV_VAR: &str = "NOTED_STATIC_DIR";
const MAX_CONNECTIONS_ENV_VAR: &str = "NOTED_DB_MAX_CONNECTIONS";

// --- Defaults ---
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://noted.db";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub static_dir: PathBuf,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source. Unset variables fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup(LISTEN_ADDR_ENV_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: LISTEN_ADDR_ENV_VAR,
            value: listen_addr.clone(),
            reason: e.to_string(),
        })?;

        let max_connections = match lookup(MAX_CONNECTIONS_ENV_VAR) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: MAX_CONNECTIONS_ENV_VAR,
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: MAX_CONNECTIONS_ENV_VAR,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            listen_addr,
            database_url: lookup(DATABASE_URL_ENV_VAR).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            static_dir: lookup(STATIC_DIR_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            max_connections,
        })
    }
}
