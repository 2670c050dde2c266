//! Canned PokeAPI documents and their expected translations.
//!
//! The documents carry extra upstream fields (`order`, `types`, stat `url`s)
//! so decoding is exercised against a realistic shape.

use dex_core::entities::{Pokemon, PokemonStat};
use serde_json::{Value, json};

fn stat_json(name: &str, index: u32, base_stat: i64, effort: i64) -> Value {
    json!({
        "base_stat": base_stat,
        "effort": effort,
        "stat": {
            "name": name,
            "url": format!("https://pokeapi.co/api/v2/stat/{index}/")
        }
    })
}

/// id 25, one stat: `("speed", 90, 2)`.
#[must_use]
pub fn pikachu_json() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "order": 35,
        "base_experience": 112,
        "types": [{ "slot": 1, "type": { "name": "electric" } }],
        "stats": [stat_json("speed", 6, 90, 2)]
    })
}

#[must_use]
pub fn pikachu() -> Pokemon {
    Pokemon {
        id: 25,
        name: "pikachu".into(),
        height: 4,
        weight: 60,
        stats: vec![stat("speed", 90, 2)],
    }
}

const CHARIZARD_STATS: [(&str, i64, i64); 6] = [
    ("hp", 78, 0),
    ("attack", 84, 0),
    ("defense", 78, 0),
    ("special-attack", 109, 3),
    ("special-defense", 85, 0),
    ("speed", 100, 0),
];

/// id 6, the full six-stat block in upstream order.
#[must_use]
pub fn charizard_json() -> Value {
    let stats: Vec<Value> = CHARIZARD_STATS
        .iter()
        .zip(1..)
        .map(|((name, base, effort), index)| stat_json(name, index, *base, *effort))
        .collect();
    json!({
        "id": 6,
        "name": "charizard",
        "height": 17,
        "weight": 905,
        "order": 7,
        "stats": stats
    })
}

#[must_use]
pub fn charizard() -> Pokemon {
    Pokemon {
        id: 6,
        name: "charizard".into(),
        height: 17,
        weight: 905,
        stats: CHARIZARD_STATS
            .iter()
            .map(|(name, base, effort)| stat(name, *base, *effort))
            .collect(),
    }
}

/// id 132, no stats at all.
#[must_use]
pub fn ditto_json() -> Value {
    json!({ "id": 132, "name": "ditto", "height": 3, "weight": 40, "stats": [] })
}

#[must_use]
pub fn ditto() -> Pokemon {
    Pokemon {
        id: 132,
        name: "ditto".into(),
        height: 3,
        weight: 40,
        stats: Vec::new(),
    }
}

/// Resolve a lowercased name or numeric id to its document.
#[must_use]
pub fn lookup_json(key: &str) -> Option<Value> {
    match key {
        "pikachu" | "25" => Some(pikachu_json()),
        "charizard" | "6" => Some(charizard_json()),
        "ditto" | "132" => Some(ditto_json()),
        _ => None,
    }
}

#[must_use]
pub fn stat(name: &str, base_stat: i64, effort: i64) -> PokemonStat {
    PokemonStat {
        name: name.to_string(),
        base_stat,
        effort,
    }
}
