//! External → internal shape translation.

use dex_core::entities::{Pokemon, PokemonStat};

use crate::model::{ApiPokemon, ApiStat};

/// Map a decoded PokeAPI document onto the persisted [`Pokemon`] shape.
///
/// Scalars are copied unchanged; each upstream stat becomes one
/// `(name, base_stat, effort)` triple, preserving count and order.
#[must_use]
pub fn translate(api: ApiPokemon) -> Pokemon {
    Pokemon {
        id: api.id,
        name: api.name,
        height: api.height,
        weight: api.weight,
        stats: api.stats.into_iter().map(PokemonStat::from).collect(),
    }
}

impl From<ApiStat> for PokemonStat {
    fn from(stat: ApiStat) -> Self {
        Self {
            name: stat.stat.name,
            base_stat: stat.base_stat,
            effort: stat.effort,
        }
    }
}

impl From<ApiPokemon> for Pokemon {
    fn from(api: ApiPokemon) -> Self {
        translate(api)
    }
}
