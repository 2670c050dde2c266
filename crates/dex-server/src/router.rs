//! Router construction for the Pokedex server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response, header::USER_AGENT},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/pokemons", get(handlers::pokemons::list))
        .route(
            "/pokemons/integrate/{name}",
            post(handlers::pokemons::integrate),
        )
        .route(
            "/pokemons/integrate",
            post(handlers::pokemons::integrate_without_name),
        )
        .route(
            "/pokemons/integrate/",
            post(handlers::pokemons::integrate_without_name),
        )
        .route(
            "/pokemons/deletePokemonByID/{id}",
            delete(handlers::pokemons::delete_by_id),
        );

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(log_response),
        )
        .with_state(state)
}

fn request_span(req: &Request<Body>) -> Span {
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        client_ip = %client_ip,
        user_agent,
    )
}

fn log_response(res: &Response<Body>, latency: Duration, _span: &Span) {
    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    tracing::info!(status = res.status().as_u16(), latency_ms, "request completed");
}
