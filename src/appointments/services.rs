use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::records::{create_if_absent, CreateOutcome};
use crate::store::{Collection, Document, DocumentStore, Filter, StoredRecord};

pub const PENDING: &str = "pending";

/// Books an appointment unless the patient already has a pending one.
///
/// The body is free-form; only `patient_email` is required.
/// `appointment_status` defaults to `"pending"`.
pub async fn book(store: &dyn DocumentStore, mut doc: Document) -> Result<StoredRecord, ApiError> {
    let patient_email = match doc.get("patient_email").and_then(Value::as_str).map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: patient_email".into(),
            ))
        }
    };
    // Stored key must equal the lookup key or the unique index and the lookup disagree.
    doc.insert("patient_email".into(), json!(patient_email));
    if doc.get("appointment_status").map_or(true, Value::is_null) {
        doc.insert("appointment_status".into(), json!(PENDING));
    }

    let mut conflict = Filter::new();
    conflict.insert("patient_email".into(), json!(patient_email));
    conflict.insert("appointment_status".into(), json!(PENDING));

    match create_if_absent(store, Collection::Appointments, &conflict, doc, Ok).await? {
        CreateOutcome::Created(record) => {
            info!(appointment_id = %record.id, patient = %patient_email, "appointment booked");
            Ok(record)
        }
        CreateOutcome::Conflict => {
            warn!(patient = %patient_email, "pending appointment already exists");
            Err(ApiError::Conflict(
                "You already have a pending appointment.".into(),
            ))
        }
    }
}
