//! # dex-testkit
//!
//! Shared test tooling for the Pokedex crates:
//! - [`fixtures`]: canned PokeAPI documents and the entities they translate to
//! - [`FakePokeApi`]: an axum server on `127.0.0.1:0` that serves the
//!   fixtures and counts every request it receives
//!
//! Special names trigger failure modes:
//!
//! | name | response |
//! |------|----------|
//! | `broken` | 200 with a body that is not a pokemon document |
//! | `slow` | pikachu, after [`SLOW_DELAY`] |
//! | `ratelimited` | 429 with `Retry-After: 7` |
//! | `exploding` | 500 |
//! | anything unknown | 404 `Not Found` |

pub mod fixtures;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::task::JoinHandle;

/// How long the `slow` name takes to answer.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeState {
    hits: AtomicUsize,
}

/// In-process stand-in for `https://pokeapi.co/api/v2/pokemon`.
///
/// The server task is aborted when the value is dropped.
pub struct FakePokeApi {
    addr: SocketAddr,
    state: Arc<FakeState>,
    task: JoinHandle<()>,
}

impl FakePokeApi {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the loopback listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/api/v2/pokemon/{name}", get(lookup))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake PokeAPI listener");
        let addr = listener.local_addr().expect("fake PokeAPI local addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    /// Base URL to put in `pokeapi.base_url`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2/pokemon", self.addr)
    }

    /// Number of lookups received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakePokeApi {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn lookup(State(state): State<Arc<FakeState>>, Path(name): Path<String>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match name.as_str() {
        "broken" => (StatusCode::OK, r#"{"id": "twenty-five", "name": 7"#).into_response(),
        "slow" => {
            tokio::time::sleep(SLOW_DELAY).await;
            Json(fixtures::pikachu_json()).into_response()
        }
        "ratelimited" => (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", "7")],
            "Too Many Requests",
        )
            .into_response(),
        "exploding" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        other => match fixtures::lookup_json(other) {
            Some(doc) => Json(doc).into_response(),
            None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        },
    }
}
