//! `/api/v1/pokemons` handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use dex_core::entities::Pokemon;
use dex_core::errors::ServiceError;
use dex_core::responses::ApiResponse;

use crate::error::AppError;
use crate::state::AppState;

/// POST /pokemons/integrate/{name}
pub async fn integrate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Pokemon>>, AppError> {
    let ctx = state.request_context();
    let pokemon = state.service.integrate(&ctx, &name).await?;
    Ok(Json(ApiResponse::ok("Pokemon successfully inserted", pokemon)))
}

/// POST /pokemons/integrate/ with the name segment left out.
pub async fn integrate_without_name() -> AppError {
    AppError(ServiceError::invalid_input("Pokemon name must not be empty"))
}

/// GET /pokemons
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Pokemon>>>, AppError> {
    let ctx = state.request_context();
    let listing = state.service.list(&ctx).await?;
    let message = listing.message();
    Ok(Json(ApiResponse::ok(message, listing.into_vec())))
}

/// DELETE /pokemons/deletePokemonByID/{id}
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Pokemon>>, AppError> {
    let id = parse_id(&raw_id)?;
    let ctx = state.request_context();
    let pokemon = state.service.delete_by_id(&ctx, id).await?;
    Ok(Json(ApiResponse::ok("Pokemon deleted successfully", pokemon)))
}

fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::invalid_input("Invalid ID format"))
}
