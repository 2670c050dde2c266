//! HTTP contract tests: router + pipeline + fake PokeAPI + on-disk store.

use std::time::Duration;

use axum::{Router, body::Body};
use axum::http::{Method, Request, StatusCode};
use dex_config::{DatabaseConfig, PokeApiConfig};
use dex_db::PokedexDb;
use dex_server::{AppState, build_router};
use dex_service::PokemonService;
use dex_source::PokeApiClient;
use dex_testkit::{FakePokeApi, fixtures};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    fake: FakePokeApi,
    router: Router,
}

impl TestApp {
    async fn start() -> Self {
        let fake = FakePokeApi::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = PokedexDb::open(&DatabaseConfig::local(
            dir.path().join("pokedex.db").to_str().unwrap(),
        ))
        .await
        .unwrap();
        let source = PokeApiClient::new(&PokeApiConfig::with_base_url(fake.base_url())).unwrap();
        let state = AppState::new(PokemonService::new(source, store), Duration::from_secs(2));
        Self {
            _dir: dir,
            fake,
            router: build_router(state),
        }
    }

    async fn send(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("user-agent", "dex-tests")
            .body(Body::empty())
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

#[tokio::test]
async fn integrate_returns_envelope_with_entity() {
    let app = TestApp::start().await;

    let (status, body) = app
        .send(Method::POST, "/api/v1/pokemons/integrate/pikachu")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": 200,
            "message": "Pokemon successfully inserted",
            "data": serde_json::to_value(fixtures::pikachu()).unwrap()
        })
    );
}

#[tokio::test]
async fn integrate_without_name_is_bad_request() {
    let app = TestApp::start().await;

    for uri in ["/api/v1/pokemons/integrate/", "/api/v1/pokemons/integrate"] {
        let (status, body) = app.send(Method::POST, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(
            body,
            json!({ "error": "Pokemon name must not be empty", "code": "INVALID_INPUT" })
        );
    }
    assert_eq!(app.fake.hits(), 0);
}

#[tokio::test]
async fn integrate_blank_encoded_name_is_bad_request() {
    let app = TestApp::start().await;
    let (status, body) = app
        .send(Method::POST, "/api/v1/pokemons/integrate/%20%20")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.fake.hits(), 0);
}

#[tokio::test]
async fn unknown_pokemon_is_not_found_api_error() {
    let app = TestApp::start().await;

    let (status, body) = app
        .send(Method::POST, "/api/v1/pokemons/integrate/notapokemon")
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error": "PokeAPI returned unexpected status code: 404",
            "code": "API_ERROR"
        })
    );
}

#[tokio::test]
async fn upstream_failure_is_server_error() {
    let app = TestApp::start().await;
    let (status, body) = app
        .send(Method::POST, "/api/v1/pokemons/integrate/exploding")
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "API_ERROR");
}

#[tokio::test]
async fn duplicate_integration_is_conflict() {
    let app = TestApp::start().await;
    app.send(Method::POST, "/api/v1/pokemons/integrate/pikachu")
        .await;

    let (status, body) = app
        .send(Method::POST, "/api/v1/pokemons/integrate/PIKACHU")
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({
            "error": "Pokemon with id 25 already exists",
            "code": "POKEMON_ALREADY_EXISTS"
        })
    );
}

#[tokio::test]
async fn list_reports_empty_then_found() {
    let app = TestApp::start().await;

    let (status, body) = app.send(Method::GET, "/api/v1/pokemons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "code": 200, "message": "No Pokemons found", "data": [] })
    );

    app.send(Method::POST, "/api/v1/pokemons/integrate/ditto")
        .await;
    let (status, body) = app.send(Method::GET, "/api/v1/pokemons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pokemons retrieved successfully");
    assert_eq!(
        body["data"],
        json!([serde_json::to_value(fixtures::ditto()).unwrap()])
    );
}

#[tokio::test]
async fn delete_returns_snapshot() {
    let app = TestApp::start().await;
    app.send(Method::POST, "/api/v1/pokemons/integrate/pikachu")
        .await;

    let (status, body) = app
        .send(Method::DELETE, "/api/v1/pokemons/deletePokemonByID/25")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pokemon deleted successfully");
    assert_eq!(body["data"], serde_json::to_value(fixtures::pikachu()).unwrap());

    let (_, listed) = app.send(Method::GET, "/api/v1/pokemons").await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn delete_absent_id_is_not_found() {
    let app = TestApp::start().await;

    let (status, body) = app
        .send(Method::DELETE, "/api/v1/pokemons/deletePokemonByID/999")
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error": "Pokemon with id 999 not found", "code": "POKEMON_NOT_FOUND" })
    );
}

#[tokio::test]
async fn delete_non_numeric_id_is_bad_request() {
    let app = TestApp::start().await;

    let (status, body) = app
        .send(Method::DELETE, "/api/v1/pokemons/deletePokemonByID/abc")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid ID format", "code": "INVALID_INPUT" })
    );
}

#[tokio::test]
async fn health_reports_store_count() {
    let app = TestApp::start().await;
    app.send(Method::POST, "/api/v1/pokemons/integrate/charizard")
        .await;

    let (status, body) = app.send(Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "pokemons": 1 }));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::start().await;
    let (status, _) = app.send(Method::GET, "/api/v2/pokemons").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
