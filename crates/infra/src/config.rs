//! Store configuration (connection target + backend selection).

use core::str::FromStr;

use crate::error::StoreError;

/// Local file-backed database used when no connection target is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://Items.db";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which [`crate::ItemStore`] implementation to build.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Non-durable; for local experiments and tests.
    InMemory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::InMemory => "memory",
        }
    }
}

impl core::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::InMemory),
            other => Err(StoreError::InvalidConfig(format!(
                "unknown store backend `{other}` (expected `sqlite` or `memory`)"
            ))),
        }
    }
}

/// Everything needed to construct a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection string, e.g. `sqlite://Items.db`.
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn sqlite(database_url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::sqlite(DEFAULT_DATABASE_URL)
    }
}
