//! Infrastructure layer: durable item storage and its configuration.

pub mod config;
pub mod error;
pub mod item_store;

pub use config::{StoreBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use item_store::{InMemoryItemStore, ItemStore, SqliteItemStore};
