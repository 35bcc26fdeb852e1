use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::ApiError,
    records,
    state::AppState,
    store::{Collection, Filter},
};

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/all-doctors-info", get(all_doctors))
        .route("/all-doctors-info-by-query", get(doctors_by_query))
}

#[instrument(skip(state))]
pub async fn all_doctors(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let doctors = records::list(state.store.as_ref(), Collection::Doctors, &Filter::new()).await?;
    Ok(Json(doctors.into_iter().map(|r| r.into_json()).collect()))
}

/// Each query parameter must equal the doctor's field, e.g. `?specialty=Hematology`.
#[instrument(skip(state))]
pub async fn doctors_by_query(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(params) = query?;
    let filter: Filter = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let doctors = records::list(state.store.as_ref(), Collection::Doctors, &filter).await?;
    Ok(Json(doctors.into_iter().map(|r| r.into_json()).collect()))
}
