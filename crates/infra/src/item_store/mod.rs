//! Item store boundary.
//!
//! The store exclusively owns the authoritative item collection. It is the
//! only place an [`ItemId`] is minted, and every mutating call commits before
//! returning.

use std::sync::Arc;

use todoapi_core::{Item, ItemDraft, ItemId, Mutation};

use crate::error::StoreResult;

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryItemStore;
pub use sqlite::SqliteItemStore;

/// Durable CRUD over the item collection.
///
/// Absence is never an error: `get` returns `None`, `update`/`delete` return
/// [`Mutation::NotFound`]. Any `Err` is a storage fault and is not retried.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    /// Every persisted item. Empty when nothing is stored.
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// Lookup by primary key.
    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Persist `draft` under a freshly assigned id and return the stored item.
    async fn create(&self, draft: ItemDraft) -> StoreResult<Item>;

    /// Replace every mutable field of item `id` with `draft`.
    async fn update(&self, id: ItemId, draft: ItemDraft) -> StoreResult<Mutation>;

    /// Permanently remove item `id`.
    async fn delete(&self, id: ItemId) -> StoreResult<Mutation>;

    /// Release backing resources. Calls made afterwards fail with a storage
    /// fault.
    async fn close(&self) {}
}

#[async_trait::async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn list(&self) -> StoreResult<Vec<Item>> {
        (**self).list().await
    }

    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        (**self).get(id).await
    }

    async fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        (**self).create(draft).await
    }

    async fn update(&self, id: ItemId, draft: ItemDraft) -> StoreResult<Mutation> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: ItemId) -> StoreResult<Mutation> {
        (**self).delete(id).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
