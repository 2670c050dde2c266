//! # dex-server
//!
//! axum HTTP surface for the integration pipeline. Routes live under
//! `/api/v1`, plus an unversioned `/health`. The `dexd` binary in this
//! crate wires configuration, the store and the PokeAPI client together.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
