//! Process configuration, read once at startup from the environment.
//!
//! | Variable             | Default              |
//! |----------------------|----------------------|
//! | `DATABASE_URL`       | `sqlite://Items.db`  |
//! | `ITEMS_STORE`        | `sqlite`             |
//! | `DB_MAX_CONNECTIONS` | `5`                  |
//! | `BIND_ADDR`          | `0.0.0.0:8080`       |
//! | `LOG_FORMAT`         | `json`               |
//!
//! `RUST_LOG` is read by the tracing subscriber directly.

use std::net::SocketAddr;

use thiserror::Error;

use todoapi_infra::{StoreBackend, StoreConfig};
use todoapi_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut store = StoreConfig::default();
        if let Some(url) = get("DATABASE_URL") {
            store.database_url = url;
        }
        if let Some(backend) = get("ITEMS_STORE") {
            store.backend = backend
                .parse::<StoreBackend>()
                .map_err(|e| ConfigError::invalid("ITEMS_STORE", e.to_string()))?;
        }
        if let Some(max) = get("DB_MAX_CONNECTIONS") {
            store.max_connections = match max.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::invalid(
                        "DB_MAX_CONNECTIONS",
                        format!("expected a positive integer, got `{max}`"),
                    ));
                }
            };
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", format!("`{bind_addr}`: {e}")))?;

        let log_format = get("LOG_FORMAT")
            .map(|v| LogFormat::from_name(&v))
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            store,
            log_format,
        })
    }
}
