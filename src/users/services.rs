use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::records::{create_if_absent, CreateOutcome};
use crate::store::{to_document, Collection, DocumentStore, Filter};

use super::dto::{PublicUser, RegisterRequest, RegistrationType, UserDocument};
use super::password::hash_password;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn required(field: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match field {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Checks the request and builds the document to store, secret still in plain text.
pub fn validate(
    req: RegisterRequest,
    registration_type: RegistrationType,
) -> Result<UserDocument, ApiError> {
    let mut missing = Vec::new();
    let full_name = required(req.name, "name", &mut missing);
    let user_email = required(req.email, "email", &mut missing);
    let country = required(req.country, "country", &mut missing);
    let phone_number = required(req.phone, "phone", &mut missing);
    let password = required(req.password, "password", &mut missing);

    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }
    if !is_valid_email(&user_email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let account_creation_time = match req.account_creation_time {
        Some(v) if !v.is_null() => v,
        _ => Value::String(
            OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .map_err(anyhow::Error::from)?,
        ),
    };

    Ok(UserDocument {
        full_name,
        user_email,
        password,
        country,
        phone_number,
        registration_type,
        account_creation_time,
    })
}

/// Registers a user unless the email is already taken.
///
/// `Manually` registrations have their password replaced by an Argon2 hash
/// before the insert. `Google` registrations keep the federated credential
/// as submitted.
pub async fn register(
    store: &dyn DocumentStore,
    req: RegisterRequest,
    registration_type: RegistrationType,
) -> Result<PublicUser, ApiError> {
    let user = validate(req, registration_type)?;

    let mut conflict = Filter::new();
    conflict.insert("user_email".into(), json!(user.user_email));
    let candidate = to_document(&user)?;

    let outcome = create_if_absent(store, Collection::Users, &conflict, candidate, |mut doc| {
        if registration_type == RegistrationType::Manually {
            doc.insert("password".into(), Value::String(hash_password(&user.password)?));
        }
        Ok(doc)
    })
    .await?;

    match outcome {
        CreateOutcome::Created(record) => {
            info!(user_id = %record.id, email = %user.user_email, ?registration_type, "user registered");
            Ok(PublicUser::new(record.id, user))
        }
        CreateOutcome::Conflict => {
            warn!(email = %user.user_email, "email already registered");
            Err(ApiError::Conflict("User already exists.".into()))
        }
    }
}
