use tracing::{debug, warn};

use crate::store::{Collection, Document, DocumentStore, Filter, StoreError, StoredRecord};

#[derive(Debug)]
pub enum CreateOutcome {
    Created(StoredRecord),
    Conflict,
}

/// Insert `candidate` unless a record matching `conflict` exists. The lookup
/// is a fast path only; a unique violation on insert is also a conflict.
pub async fn create_if_absent<F>(
    store: &dyn DocumentStore,
    collection: Collection,
    conflict: &Filter,
    candidate: Document,
    prepare: F,
) -> anyhow::Result<CreateOutcome>
where
    F: FnOnce(Document) -> anyhow::Result<Document>,
{
    if store.find_one(collection, conflict).await?.is_some() {
        debug!(collection = collection.table(), "conflicting record found");
        return Ok(CreateOutcome::Conflict);
    }

    let doc = prepare(candidate)?;

    match store.insert_one(collection, doc).await {
        Ok(record) => Ok(CreateOutcome::Created(record)),
        Err(StoreError::Duplicate(table)) => {
            warn!(collection = table, "insert lost a race on unique key");
            Ok(CreateOutcome::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<StoredRecord>, StoreError> {
    let records = store.find(collection, filter).await?;
    debug!(collection = collection.table(), count = records.len(), "listed records");
    Ok(records)
}
