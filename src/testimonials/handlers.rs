use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::ApiError,
    records,
    state::AppState,
    store::{Collection, Filter},
};

pub fn testimonial_routes() -> Router<AppState> {
    Router::new().route("/all-testimonials", get(all_testimonials))
}

#[instrument(skip(state))]
pub async fn all_testimonials(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let testimonials =
        records::list(state.store.as_ref(), Collection::Testimonials, &Filter::new()).await?;
    Ok(Json(testimonials.into_iter().map(|r| r.into_json()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::DownStore;
    use axum::{http::StatusCode, response::IntoResponse};
    use std::sync::Arc;

    #[tokio::test]
    async fn no_testimonials_is_an_empty_array() {
        let Json(rows) = all_testimonials(State(AppState::in_memory())).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let state = AppState::from_parts(Arc::new(DownStore), AppState::in_memory().config);
        let res = all_testimonials(State(state)).await.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
