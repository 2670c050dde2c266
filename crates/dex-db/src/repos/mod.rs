//! Repository modules implementing the store operations.
//!
//! Each module adds methods to `PokedexDb` via `impl PokedexDb` blocks.

pub mod pokemon;
