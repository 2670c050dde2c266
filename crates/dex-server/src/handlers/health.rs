//! GET /health: liveness plus a store round trip.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dex_core::responses::{ErrorBody, HealthResponse};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Response {
    let ctx = state.request_context();
    match state.service.count(&ctx).await {
        Ok(pokemons) => Json(HealthResponse {
            status: "ok".into(),
            pokemons,
        })
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err.chain(), "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorBody::from(&err))).into_response()
        }
    }
}
