use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

pub type Document = Map<String, Value>;

/// Field -> expected value. A record matches when every entry is equal.
pub type Filter = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Appointments,
    Doctors,
    Testimonials,
}

/// `field` is unique among records where `when` holds (all, if `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub field: &'static str,
    pub when: Option<(&'static str, &'static str)>,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Collection::Users => "user_credentials",
            Collection::Appointments => "appointments",
            Collection::Doctors => "doctors",
            Collection::Testimonials => "testimonials",
        }
    }

    /// Mirrors the unique indexes created in `migrations/`.
    pub fn unique_constraint(self) -> Option<UniqueConstraint> {
        match self {
            Collection::Users => Some(UniqueConstraint {
                field: "user_email",
                when: None,
            }),
            Collection::Appointments => Some(UniqueConstraint {
                field: "patient_email",
                when: Some(("appointment_status", "pending")),
            }),
            Collection::Doctors | Collection::Testimonials => None,
        }
    }
}

impl UniqueConstraint {
    pub fn key_of<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        if let Some((field, expected)) = self.when {
            if doc.get(field).and_then(Value::as_str) != Some(expected) {
                return None;
            }
        }
        doc.get(self.field).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: Uuid,
    pub doc: Document,
    pub created_at: OffsetDateTime,
}

impl StoredRecord {
    pub fn into_json(self) -> Value {
        let mut doc = self.doc;
        doc.insert("_id".into(), Value::String(self.id.to_string()));
        Value::Object(doc)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key in {0}")]
    Duplicate(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<StoredRecord>, StoreError>;

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<StoredRecord>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] when the
    /// collection's unique constraint is already taken.
    async fn insert_one(
        &self,
        collection: Collection,
        doc: Document,
    ) -> Result<StoredRecord, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self);
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Encode(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}

pub fn matches(doc: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}
