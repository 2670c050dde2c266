use serde::{Deserialize, Serialize};

/// One named stat attached to a pokemon, e.g. `("speed", 90, 2)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonStat {
    pub name: String,
    pub base_stat: i64,
    pub effort: i64,
}

/// A pokemon integrated from the external source.
///
/// `id` is assigned by the source and is the primary key of the store.
/// `stats` keeps the order the source returned them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    pub height: i64,
    pub weight: i64,
    pub stats: Vec<PokemonStat>,
}
