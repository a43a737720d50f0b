use std::collections::BTreeMap;
use std::sync::RwLock;

use todoapi_core::{Item, ItemDraft, ItemId, Mutation};

use super::ItemStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug)]
struct State {
    next_id: i64,
    items: BTreeMap<ItemId, Item>,
}

/// In-memory item store for tests/dev.
///
/// Ids start at 1 and are never handed out twice, even after a delete.
#[derive(Debug)]
pub struct InMemoryItemStore {
    inner: RwLock<State>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                next_id: 1,
                items: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.items.values().cloned().collect())
    }

    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.items.get(&id).cloned())
    }

    async fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = ItemId::new(state.next_id);
        state.next_id += 1;

        let item = draft.into_item(id);
        state.items.insert(id, item.clone());
        tracing::debug!(item_id = %id, "item created");
        Ok(item)
    }

    async fn update(&self, id: ItemId, draft: ItemDraft) -> StoreResult<Mutation> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match state.items.get_mut(&id) {
            Some(item) => {
                item.replace_with(draft);
                tracing::debug!(item_id = %id, "item updated");
                Ok(Mutation::Applied)
            }
            None => Ok(Mutation::NotFound),
        }
    }

    async fn delete(&self, id: ItemId) -> StoreResult<Mutation> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match state.items.remove(&id) {
            Some(_) => {
                tracing::debug!(item_id = %id, "item deleted");
                Ok(Mutation::Applied)
            }
            None => Ok(Mutation::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> ItemDraft {
        ItemDraft::new("Buy milk").with_kind("errand")
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryItemStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryItemStore::new();
        let a = store.create(milk()).await.unwrap();
        let b = store.create(milk()).await.unwrap();

        assert_eq!(a.id, ItemId::new(1));
        assert_eq!(b.id, ItemId::new(2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryItemStore::new();
        let a = store.create(milk()).await.unwrap();
        assert_eq!(store.delete(a.id).await.unwrap(), Mutation::Applied);

        let b = store.create(milk()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn unknown_ids_are_absent_and_not_found() {
        let store = InMemoryItemStore::new();
        let id = ItemId::new(-1);

        assert_eq!(store.get(id).await.unwrap(), None);
        assert_eq!(store.update(id, milk()).await.unwrap(), Mutation::NotFound);
        assert_eq!(store.delete(id).await.unwrap(), Mutation::NotFound);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let store = InMemoryItemStore::new();
        let item = store.create(milk()).await.unwrap();

        assert_eq!(store.delete(item.id).await.unwrap(), Mutation::Applied);
        assert_eq!(store.get(item.id).await.unwrap(), None);
        assert_eq!(store.delete(item.id).await.unwrap(), Mutation::NotFound);
    }

    #[tokio::test]
    async fn list_tracks_creates_and_deletes() {
        let store = InMemoryItemStore::new();
        let a = store.create(ItemDraft::new("A")).await.unwrap();
        let b = store.create(ItemDraft::new("B")).await.unwrap();
        let c = store.create(ItemDraft::new("C")).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![a.clone(), b.clone(), c.clone()]);

        store.delete(b.id).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![a, c]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn opt_text() -> impl Strategy<Value = Option<String>> {
            proptest::option::of("[A-Za-z0-9 ]{0,30}")
        }

        prop_compose! {
            fn any_draft()(
                name in opt_text(),
                description in opt_text(),
                kind in opt_text(),
                is_completed in any::<bool>(),
            ) -> ItemDraft {
                ItemDraft { name, description, kind, is_completed }
            }
        }

        fn block_on<F: std::future::Future>(fut: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(fut)
        }

        proptest! {
            /// Property: create then get yields the created item.
            #[test]
            fn create_then_get_round_trips(draft in any_draft()) {
                let store = InMemoryItemStore::new();
                let (created, fetched) = block_on(async {
                    let created = store.create(draft.clone()).await.unwrap();
                    let fetched = store.get(created.id).await.unwrap();
                    (created, fetched)
                });

                prop_assert_eq!(&created, &draft.into_item(created.id));
                prop_assert_eq!(fetched, Some(created));
            }

            /// Property: update replaces wholesale, keeping the id.
            #[test]
            fn update_then_get_yields_replacement(before in any_draft(), after in any_draft()) {
                let store = InMemoryItemStore::new();
                let (id, outcome, fetched) = block_on(async {
                    let created = store.create(before).await.unwrap();
                    let outcome = store.update(created.id, after.clone()).await.unwrap();
                    let fetched = store.get(created.id).await.unwrap();
                    (created.id, outcome, fetched)
                });

                prop_assert_eq!(outcome, Mutation::Applied);
                prop_assert_eq!(fetched, Some(after.into_item(id)));
            }

            /// Property: a deleted item is absent, and deleting it again is not-found.
            #[test]
            fn delete_then_get_is_absent(
                drafts in proptest::collection::vec(any_draft(), 1..5),
                pick in any::<prop::sample::Index>(),
            ) {
                let store = InMemoryItemStore::new();
                let (victim, others, first, fetched, second, listed) = block_on(async {
                    let mut created = Vec::new();
                    for draft in drafts {
                        created.push(store.create(draft).await.unwrap());
                    }
                    let victim = created.remove(pick.index(created.len()));

                    let first = store.delete(victim.id).await.unwrap();
                    let fetched = store.get(victim.id).await.unwrap();
                    let second = store.delete(victim.id).await.unwrap();
                    let listed = store.list().await.unwrap();
                    (victim, created, first, fetched, second, listed)
                });

                prop_assert_eq!(first, Mutation::Applied);
                prop_assert_eq!(fetched, None);
                prop_assert_eq!(second, Mutation::NotFound);
                prop_assert!(!listed.contains(&victim));
                prop_assert_eq!(listed, others);
            }

            /// Property: ids never returned by create are absent everywhere.
            #[test]
            fn foreign_ids_are_not_found(count in 0usize..5, raw in any::<i64>()) {
                let store = InMemoryItemStore::new();
                let (minted, get, update, delete) = block_on(async {
                    let mut minted = Vec::new();
                    for _ in 0..count {
                        minted.push(store.create(ItemDraft::default()).await.unwrap().id);
                    }
                    let unknown = ItemId::new(raw);
                    (
                        minted,
                        store.get(unknown).await.unwrap(),
                        store.update(unknown, ItemDraft::default()).await.unwrap(),
                        store.delete(unknown).await.unwrap(),
                    )
                });

                prop_assume!(!minted.contains(&ItemId::new(raw)));
                prop_assert_eq!(get, None);
                prop_assert_eq!(update, Mutation::NotFound);
                prop_assert_eq!(delete, Mutation::NotFound);
            }
        }
    }
}
