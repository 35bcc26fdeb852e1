use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// How the account was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationType {
    /// Email + password form; the password is hashed before storage.
    Manually,
    /// Federated sign-in pop-up; the credential is stored as given.
    Google,
}

/// Request body for both registration endpoints.
///
/// Every field is optional at the parsing stage so that missing fields are
/// reported together by validation instead of as a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub account_creation_time: Option<Value>,
}

/// User record as stored in the `user_credentials` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    pub full_name: String,
    pub user_email: String,
    pub password: String,
    pub country: String,
    pub phone_number: String,
    pub registration_type: RegistrationType,
    pub account_creation_time: Value,
}

/// Stored user as returned to the client, without the secret.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub full_name: String,
    pub user_email: String,
    pub country: String,
    pub phone_number: String,
    pub registration_type: RegistrationType,
    pub account_creation_time: Value,
}

impl PublicUser {
    pub fn new(id: Uuid, user: UserDocument) -> Self {
        Self {
            id,
            full_name: user.full_name,
            user_email: user.user_email,
            country: user.country,
            phone_number: user.phone_number,
            registration_type: user.registration_type,
            account_creation_time: user.account_creation_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub message: &'static str,
    pub user: PublicUser,
}
