//! SQLite-backed item store.
//!
//! A single `Items` table keyed by an auto-incrementing integer id, with one
//! column per item field. `AUTOINCREMENT` (rather than a bare rowid alias)
//! keeps ids from being reused after the highest row is deleted.
//!
//! Every statement runs in autocommit mode on a pool configured with
//! `synchronous = FULL`, so a write has reached disk by the time the call
//! returns. Update and delete are single statements; "not found" is read off
//! the affected-row count, never from a separate lookup.

use core::str::FromStr;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::Row;

use todoapi_core::{Item, ItemDraft, ItemId, Mutation};

use super::ItemStore;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// SQLite-backed item store.
#[derive(Debug, Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    /// Open (creating if missing) the database named by `config.database_url`
    /// and make sure the `Items` table exists.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| {
                StoreError::InvalidConfig(format!(
                    "bad database url `{}`: {e}",
                    config.database_url
                ))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, ensuring the schema is present.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS Items (
                Id          INTEGER PRIMARY KEY AUTOINCREMENT,
                Name        TEXT NULL,
                Description TEXT NULL,
                Type        TEXT NULL,
                IsCompleted INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn item_from_row(row: &SqliteRow) -> StoreResult<Item> {
    Ok(Item {
        id: ItemId::new(row.try_get::<i64, _>("Id")?),
        name: row.try_get::<Option<String>, _>("Name")?,
        description: row.try_get::<Option<String>, _>("Description")?,
        kind: row.try_get::<Option<String>, _>("Type")?,
        is_completed: row.try_get::<bool, _>("IsCompleted")?,
    })
}

#[async_trait::async_trait]
impl ItemStore for SqliteItemStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT Id, Name, Description, Type, IsCompleted
            FROM Items
            ORDER BY Id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT Id, Name, Description, Type, IsCompleted
            FROM Items
            WHERE Id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        let result = sqlx::query(
            r#"
            INSERT INTO Items (Name, Description, Type, IsCompleted)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(draft.name.as_deref())
        .bind(draft.description.as_deref())
        .bind(draft.kind.as_deref())
        .bind(draft.is_completed)
        .execute(&self.pool)
        .await?;

        let id = ItemId::new(result.last_insert_rowid());
        tracing::debug!(item_id = %id, "item created");
        Ok(draft.into_item(id))
    }

    async fn update(&self, id: ItemId, draft: ItemDraft) -> StoreResult<Mutation> {
        let result = sqlx::query(
            r#"
            UPDATE Items
            SET Name = ?1,
                Description = ?2,
                Type = ?3,
                IsCompleted = ?4
            WHERE Id = ?5
            "#,
        )
        .bind(draft.name.as_deref())
        .bind(draft.description.as_deref())
        .bind(draft.kind.as_deref())
        .bind(draft.is_completed)
        .bind(id.get())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(Mutation::NotFound);
        }
        tracing::debug!(item_id = %id, "item updated");
        Ok(Mutation::Applied)
    }

    async fn delete(&self, id: ItemId) -> StoreResult<Mutation> {
        let result = sqlx::query("DELETE FROM Items WHERE Id = ?1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(Mutation::NotFound);
        }
        tracing::debug!(item_id = %id, "item deleted");
        Ok(Mutation::Applied)
    }

    /// Close the pool, waiting for in-flight connections to finish.
    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_config(dir: &tempfile::TempDir) -> StoreConfig {
        let path = dir.path().join("items.db");
        StoreConfig::sqlite(format!("sqlite://{}", path.display()))
    }

    #[tokio::test]
    async fn lifecycle_create_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteItemStore::connect(&db_config(&dir)).await.unwrap();

        let created = store
            .create(ItemDraft::new("Buy milk").with_kind("errand"))
            .await
            .unwrap();
        assert_eq!(created.id, ItemId::new(1));
        assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));

        let replacement = ItemDraft::new("Buy milk").with_kind("errand").completed(true);
        assert_eq!(
            store.update(created.id, replacement.clone()).await.unwrap(),
            Mutation::Applied
        );
        assert_eq!(
            store.get(created.id).await.unwrap(),
            Some(replacement.into_item(created.id))
        );

        assert_eq!(store.delete(created.id).await.unwrap(), Mutation::Applied);
        assert_eq!(store.get(created.id).await.unwrap(), None);
        assert_eq!(store.delete(created.id).await.unwrap(), Mutation::NotFound);
        assert_eq!(
            store.update(created.id, ItemDraft::default()).await.unwrap(),
            Mutation::NotFound
        );
    }

    #[tokio::test]
    async fn update_clears_fields_left_out_of_the_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteItemStore::connect(&db_config(&dir)).await.unwrap();

        let created = store
            .create(
                ItemDraft::new("Call plumber")
                    .with_description("kitchen sink")
                    .with_kind("home"),
            )
            .await
            .unwrap();

        store
            .update(created.id, ItemDraft::new("Call plumber"))
            .await
            .unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, None);
        assert_eq!(fetched.kind, None);
        assert!(!fetched.is_completed);
    }

    #[tokio::test]
    async fn list_reflects_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteItemStore::connect(&db_config(&dir)).await.unwrap();

        let a = store.create(ItemDraft::new("A")).await.unwrap();
        let b = store.create(ItemDraft::new("B")).await.unwrap();
        let c = store.create(ItemDraft::new("C")).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![a.clone(), b.clone(), c.clone()]);

        store.delete(b.id).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![a, c]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_deleting_the_newest() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteItemStore::connect(&db_config(&dir)).await.unwrap();

        let first = store.create(ItemDraft::new("first")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(ItemDraft::new("second")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn state_survives_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = db_config(&dir);

        let created = {
            let store = SqliteItemStore::connect(&config).await.unwrap();
            let created = store.create(ItemDraft::new("persist me")).await.unwrap();
            store.close().await;
            created
        };

        let reopened = SqliteItemStore::connect(&config).await.unwrap();
        assert_eq!(reopened.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn calls_after_close_are_storage_faults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteItemStore::connect(&db_config(&dir)).await.unwrap();
        store.close().await;

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
