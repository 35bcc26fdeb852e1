use async_trait::async_trait;

use super::{Collection, Document, DocumentStore, Filter, MemoryStore, StoreError, StoredRecord};

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// Every call fails as if the database were unreachable.
pub struct DownStore;

#[async_trait]
impl DocumentStore for DownStore {
    async fn find_one(
        &self,
        _c: Collection,
        _f: &Filter,
    ) -> Result<Option<StoredRecord>, StoreError> {
        Err(unavailable())
    }
    async fn find(&self, _c: Collection, _f: &Filter) -> Result<Vec<StoredRecord>, StoreError> {
        Err(unavailable())
    }
    async fn insert_one(&self, _c: Collection, _d: Document) -> Result<StoredRecord, StoreError> {
        Err(unavailable())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
    async fn close(&self) {}
}

/// Reads succeed, writes fail.
#[derive(Default)]
pub struct InsertFailsStore(pub MemoryStore);

#[async_trait]
impl DocumentStore for InsertFailsStore {
    async fn find_one(
        &self,
        c: Collection,
        f: &Filter,
    ) -> Result<Option<StoredRecord>, StoreError> {
        self.0.find_one(c, f).await
    }
    async fn find(&self, c: Collection, f: &Filter) -> Result<Vec<StoredRecord>, StoreError> {
        self.0.find(c, f).await
    }
    async fn insert_one(&self, _c: Collection, _d: Document) -> Result<StoredRecord, StoreError> {
        Err(unavailable())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
    async fn close(&self) {}
}
