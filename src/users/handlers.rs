use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreatedUserResponse, RegisterRequest, RegistrationType},
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/add-new-customer-info", post(add_customer))
        .route("/add-new-customer-info-with-pop-up", post(add_customer_with_pop_up))
}

async fn create_user(
    state: &AppState,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
    registration_type: RegistrationType,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    let Json(payload) = payload?;
    let user = services::register(state.store.as_ref(), payload, registration_type).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            message: "User created successfully.",
            user,
        }),
    ))
}

/// Manual sign-up; the password is hashed before it is stored.
#[instrument(skip(state, payload))]
pub async fn add_customer(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    create_user(&state, payload, RegistrationType::Manually).await
}

/// Sign-up through the federated pop-up; the credential is stored as given.
#[instrument(skip(state, payload))]
pub async fn add_customer_with_pop_up(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    create_user(&state, payload, RegistrationType::Google).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{DownStore, InsertFailsStore};
    use crate::store::{Collection, MemoryStore};
    use axum::response::IntoResponse;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn body(v: Value) -> Result<Json<RegisterRequest>, JsonRejection> {
        Ok(Json(serde_json::from_value(v).unwrap()))
    }

    async fn read(res: axum::response::Response) -> (StatusCode, Value) {
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        let base = AppState::in_memory();
        AppState::from_parts(store, base.config)
    }

    fn customer() -> Value {
        json!({
            "name": "Tanvir Hasan",
            "email": "tanvir@lab.org",
            "country": "Bangladesh",
            "phone": "01711111111",
            "password": "hunter22",
            "account_creation_time": "2024-02-01T08:30:00Z"
        })
    }

    #[tokio::test]
    async fn created_user_echoes_fields_without_password() {
        let state = AppState::in_memory();
        let res = add_customer(State(state), body(customer())).await.into_response();
        let (status, json) = read(res).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "User created successfully.");
        assert_eq!(json["user"]["user_email"], "tanvir@lab.org");
        assert_eq!(json["user"]["full_name"], "Tanvir Hasan");
        assert_eq!(json["user"]["registration_type"], "Manually");
        assert!(json["user"]["_id"].is_string());
        assert!(json["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn repeated_registration_is_rejected_without_writes() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        let (status, _) = add_customer(State(state.clone()), body(customer()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        for _ in 0..3 {
            let res = add_customer_with_pop_up(State(state.clone()), body(customer()))
                .await
                .into_response();
            let (status, json) = read(res).await;
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(json["message"], "User already exists.");
        }
        assert_eq!(store.len(Collection::Users).await, 1);
    }

    #[tokio::test]
    async fn missing_field_is_400() {
        let store = Arc::new(MemoryStore::new());
        let mut c = customer();
        c.as_object_mut().unwrap().remove("country");
        let res = add_customer(State(state_with(store.clone())), body(c))
            .await
            .into_response();
        let (status, json) = read(res).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing required fields: country");
        assert!(store.is_empty(Collection::Users).await);
    }

    #[tokio::test]
    async fn store_failure_is_500_without_details() {
        let down = AppState::from_parts(Arc::new(DownStore), AppState::in_memory().config);
        let res = add_customer(State(down), body(customer())).await.into_response();
        let (status, json) = read(res).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Something went wrong.");

        let store = Arc::new(InsertFailsStore::default());
        let state = AppState::from_parts(store.clone(), AppState::in_memory().config);
        let res = add_customer_with_pop_up(State(state), body(customer()))
            .await
            .into_response();
        let (status, json) = read(res).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Something went wrong.");
        assert!(store.0.is_empty(Collection::Users).await);
    }
}
