use models::state;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde_json::Value;

use crate::errors::ServiceError;

/// Key/value document store over the `state` table.
///
/// Holds at most one row per key. `set` is a single upsert statement, so two
/// writers on the same key never interleave an existence check with the write.
/// Constructed once at startup and handed to the services that need it.
#[derive(Clone)]
pub struct StateStore {
    db: DatabaseConnection,
}

impl StateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up `key`; on a miss return `default` without creating a row.
    pub async fn get(&self, key: &str, default: Value) -> Result<Value, ServiceError> {
        let row = state::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        Ok(row.map(|r| r.value).unwrap_or(default))
    }

    /// Insert `key` or replace its stored document (upsert).
    pub async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        let am = state::ActiveModel { key: Set(key.to_owned()), value: Set(value) };
        state::Entity::insert(am)
            .on_conflict(
                OnConflict::column(state::Column::Key)
                    .update_column(state::Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        Ok(())
    }

    /// Remove `key` if present; a later `get` falls back to its default.
    /// Deleting an absent key is not an error.
    pub async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        state::Entity::delete_by_id(key.to_owned())
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use sea_orm::EntityTrait;
    use serde_json::json;

    #[tokio::test]
    async fn get_on_empty_store_returns_default_without_a_row() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        let store = StateStore::new(db.clone());

        let v = store.get("missing", json!({"fallback": true})).await?;
        assert_eq!(v, json!({"fallback": true}));

        let rows = state::Entity::find().all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn set_then_get_roundtrips_and_last_write_wins() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        let store = StateStore::new(db);

        store.set("k", json!({"n": 1})).await?;
        assert_eq!(store.get("k", json!(null)).await?, json!({"n": 1}));

        store.set("k", json!({"n": 2})).await?;
        assert_eq!(store.get("k", json!(null)).await?, json!({"n": 2}));
        Ok(())
    }

    #[tokio::test]
    async fn nested_documents_roundtrip_exactly() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        let store = StateStore::new(db);

        let doc = json!({
            "title": "Dune",
            "tags": ["sci-fi", "reread"],
            "progress": {"page": 412, "of": 688, "notes": [null, 1.5, true]}
        });
        store.set("current_book", doc.clone()).await?;
        assert_eq!(store.get("current_book", json!({})).await?, doc);
        Ok(())
    }

    #[tokio::test]
    async fn delete_restores_the_default() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        let store = StateStore::new(db);

        store.set("k", json!([1, 2, 3])).await?;
        store.delete("k").await?;
        assert_eq!(store.get("k", json!([])).await?, json!([]));

        // deleting an absent key stays quiet
        store.delete("k").await?;
        Ok(())
    }
}
