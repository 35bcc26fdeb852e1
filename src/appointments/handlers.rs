use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::{appointments::services, error::ApiError, state::AppState, store::Document};

#[derive(Debug, Serialize)]
pub struct CreatedAppointmentResponse {
    pub message: &'static str,
    pub appointment: Value,
}

pub fn appointment_routes() -> Router<AppState> {
    Router::new().route("/add-new-appointment", post(add_appointment))
}

#[instrument(skip(state, payload))]
pub async fn add_appointment(
    State(state): State<AppState>,
    payload: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedAppointmentResponse>), ApiError> {
    let Json(doc) = payload?;
    let record = services::book(state.store.as_ref(), doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedAppointmentResponse {
            message: "Appointment booked successfully.",
            appointment: record.into_json(),
        }),
    ))
}
