use std::sync::Arc;

use todoapi_infra::{
    InMemoryItemStore, ItemStore, SqliteItemStore, StoreBackend, StoreConfig, StoreResult,
};

/// Shared handle to the item store, handed to every request.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ItemStore>,
    backend: StoreBackend,
}

impl AppServices {
    pub fn new(store: Arc<dyn ItemStore>, backend: StoreBackend) -> Self {
        Self { store, backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryItemStore::new()), StoreBackend::InMemory)
    }

    pub fn persistent(store: SqliteItemStore) -> Self {
        Self::new(Arc::new(store), StoreBackend::Sqlite)
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    /// Release storage resources (closes the connection pool).
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

/// Construct the store selected by `config`.
pub async fn build_services(config: &StoreConfig) -> StoreResult<AppServices> {
    match config.backend {
        StoreBackend::Sqlite => {
            let store = SqliteItemStore::connect(config).await?;
            tracing::info!(
                max_connections = config.max_connections,
                "sqlite item store ready"
            );
            Ok(AppServices::persistent(store))
        }
        StoreBackend::InMemory => {
            tracing::warn!("in-memory item store selected; items will not survive a restart");
            Ok(AppServices::in_memory())
        }
    }
}
