//! Response shapes of the PokeAPI `pokemon/{name}` endpoint.
//!
//! Only the fields the service persists are modelled; serde ignores the rest
//! of the (very large) upstream document.

use serde::{Deserialize, Serialize};

/// Pokemon document as returned by PokeAPI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiPokemon {
    pub id: i64,
    pub name: String,
    pub height: i64,
    pub weight: i64,
    #[serde(default)]
    pub stats: Vec<ApiStat>,
}

/// One entry of the upstream `stats` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiStat {
    pub base_stat: i64,
    pub effort: i64,
    pub stat: NamedResource,
}

/// PokeAPI's `{ name, url }` reference object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "abilities": [{ "ability": { "name": "static", "url": "https://pokeapi.co/api/v2/ability/9/" } }],
        "base_experience": 112,
        "height": 4,
        "id": 25,
        "is_default": true,
        "name": "pikachu",
        "order": 35,
        "stats": [
            {
                "base_stat": 35,
                "effort": 0,
                "stat": { "name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/" }
            },
            {
                "base_stat": 90,
                "effort": 2,
                "stat": { "name": "speed", "url": "https://pokeapi.co/api/v2/stat/6/" }
            }
        ],
        "types": [{ "slot": 1, "type": { "name": "electric" } }],
        "weight": 60
    }"#;

    #[test]
    fn parse_pokemon_response() {
        let data: ApiPokemon = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(data.id, 25);
        assert_eq!(data.name, "pikachu");
        assert_eq!(data.height, 4);
        assert_eq!(data.weight, 60);
        assert_eq!(data.stats.len(), 2);

        let speed = &data.stats[1];
        assert_eq!(speed.stat.name, "speed");
        assert_eq!(speed.base_stat, 90);
        assert_eq!(speed.effort, 2);
    }

    #[test]
    fn missing_required_field_fails() {
        let result = serde_json::from_str::<ApiPokemon>(r#"{ "id": 25, "name": "pikachu" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_stats_defaults_to_empty() {
        let data: ApiPokemon =
            serde_json::from_str(r#"{ "id": 132, "name": "ditto", "height": 3, "weight": 40 }"#)
                .unwrap();
        assert!(data.stats.is_empty());
    }
}
