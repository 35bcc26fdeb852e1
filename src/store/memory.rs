use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{matches, Collection, Document, DocumentStore, Filter, StoreError, StoredRecord};

/// Process-local store with the same uniqueness rules as the Postgres schema.
/// Used for tests and for running without a database.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<StoredRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub async fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|records| records.iter().find(|r| matches(&r.doc, filter)))
            .cloned())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| matches(&r.doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        doc: Document,
    ) -> Result<StoredRecord, StoreError> {
        let mut guard = self.collections.write().await;
        let records = guard.entry(collection).or_default();

        // Check and insert under one write lock, like a unique index.
        if let Some(constraint) = collection.unique_constraint() {
            if let Some(key) = constraint.key_of(&doc) {
                if records.iter().any(|r| constraint.key_of(&r.doc) == Some(key)) {
                    return Err(StoreError::Duplicate(collection.table()));
                }
            }
        }

        let record = StoredRecord {
            id: Uuid::new_v4(),
            doc,
            created_at: OffsetDateTime::now_utc(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
