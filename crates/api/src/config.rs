//! Environment-driven configuration.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "STOCKHUB_BIND_ADDR";
pub const PERSISTENT_VAR: &str = "USE_PERSISTENT_STORES";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,
}

/// Where repositories keep their rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset and empty values take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            BIND_ADDR_VAR,
            get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let persistent: bool = match get(PERSISTENT_VAR) {
            Some(raw) => parse(PERSISTENT_VAR, raw.to_ascii_lowercase())?,
            None => false,
        };

        let storage = if persistent {
            let database_url = get(DATABASE_URL_VAR).ok_or(ConfigError::MissingDatabaseUrl)?;
            let max_connections = match get(MAX_CONNECTIONS_VAR) {
                Some(raw) => parse(MAX_CONNECTIONS_VAR, raw)?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            if max_connections == 0 {
                return Err(ConfigError::Invalid {
                    var: MAX_CONNECTIONS_VAR,
                    value: "0".into(),
                    reason: "must be at least 1".into(),
                });
            }
            StorageConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StorageConfig::InMemory
        };

        Ok(Self { bind_addr, storage })
    }
}

fn parse<T>(var: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value: raw,
    })
}
