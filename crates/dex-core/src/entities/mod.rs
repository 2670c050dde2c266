//! Entity structs persisted by the Pokedex store.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize` and `Deserialize` so they can be returned verbatim by the API.

mod pokemon;

pub use pokemon::{Pokemon, PokemonStat};
