//! Row-to-entity parsing helpers.
//!
//! `stats` is stored as a JSON array of `{name, base_stat, effort}` objects,
//! the same shape the entity serializes to.

use dex_core::entities::{Pokemon, PokemonStat};

use crate::error::DatabaseError;

/// Column list shared by every query that yields a full pokemon row.
pub const POKEMON_COLUMNS: &str = "id, name, height, weight, stats";

/// Encode the stat list for the `stats` column.
///
/// # Errors
///
/// Returns `DatabaseError::Stats` if serialization fails.
pub fn encode_stats(stats: &[PokemonStat]) -> Result<String, DatabaseError> {
    serde_json::to_string(stats).map_err(DatabaseError::Stats)
}

/// Decode a `stats` column back into the stat list, preserving order.
///
/// # Errors
///
/// Returns `DatabaseError::Stats` if the text is not a JSON stat array.
pub fn decode_stats(raw: &str) -> Result<Vec<PokemonStat>, DatabaseError> {
    serde_json::from_str(raw).map_err(DatabaseError::Stats)
}

/// Parse a row selected with [`POKEMON_COLUMNS`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing, has the wrong type, or
/// the stats blob does not decode.
pub fn row_to_pokemon(row: &libsql::Row) -> Result<Pokemon, DatabaseError> {
    Ok(Pokemon {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        height: row.get::<i64>(2)?,
        weight: row.get::<i64>(3)?,
        stats: decode_stats(&row.get::<String>(4)?)?,
    })
}

const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Whether a libSQL error is a primary key or unique index violation.
///
/// Local databases report the extended result code; remote databases only
/// forward the message text.
#[must_use]
pub fn is_unique_violation(err: &libsql::Error) -> bool {
    if let libsql::Error::SqliteFailure(code, _) = err {
        if matches!(*code, SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE) {
            return true;
        }
    }
    err.to_string().contains("UNIQUE constraint failed")
}
