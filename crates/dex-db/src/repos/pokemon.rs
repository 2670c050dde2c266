//! Pokemon repository: insert, list, lookup, delete.

use dex_core::context::RequestContext;
use dex_core::entities::Pokemon;

use crate::error::DatabaseError;
use crate::helpers::{POKEMON_COLUMNS, encode_stats, is_unique_violation, row_to_pokemon};
use crate::PokedexDb;

impl PokedexDb {
    /// Insert a new pokemon keyed by its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the id is already stored (the
    /// existing row is left untouched), `DatabaseError::Timeout` if the
    /// deadline passes, and `DatabaseError` for any other failure.
    pub async fn insert_pokemon(
        &self,
        ctx: &RequestContext,
        pokemon: &Pokemon,
    ) -> Result<(), DatabaseError> {
        let stats = encode_stats(&pokemon.stats)?;
        self.bounded(ctx, "insert_pokemon", async {
            let conn = self.connection().await?;
            let result = conn
                .execute(
                    "INSERT INTO pokemons (id, name, height, weight, stats)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        pokemon.id,
                        pokemon.name.as_str(),
                        pokemon.height,
                        pokemon.weight,
                        stats
                    ],
                )
                .await;
            match result {
                Ok(_) => Ok(()),
                Err(e) if is_unique_violation(&e) => Err(DatabaseError::Conflict { id: pokemon.id }),
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    /// All stored pokemon, ordered by id. Empty is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a stats column does not
    /// decode.
    pub async fn list_pokemons(&self, ctx: &RequestContext) -> Result<Vec<Pokemon>, DatabaseError> {
        self.bounded(ctx, "list_pokemons", async {
            let conn = self.connection().await?;
            let mut rows = conn
                .query(
                    &format!("SELECT {POKEMON_COLUMNS} FROM pokemons ORDER BY id"),
                    (),
                )
                .await?;
            let mut results = Vec::new();
            while let Some(row) = rows.next().await? {
                results.push(row_to_pokemon(&row)?);
            }
            Ok(results)
        })
        .await
    }

    /// Look up one pokemon by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row does not parse.
    pub async fn get_pokemon(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<Option<Pokemon>, DatabaseError> {
        self.bounded(ctx, "get_pokemon", async {
            let conn = self.connection().await?;
            let mut rows = conn
                .query(
                    &format!("SELECT {POKEMON_COLUMNS} FROM pokemons WHERE id = ?1"),
                    libsql::params![id],
                )
                .await?;
            match rows.next().await? {
                Some(row) => Ok(Some(row_to_pokemon(&row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Number of stored pokemon.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_pokemons(&self, ctx: &RequestContext) -> Result<u64, DatabaseError> {
        self.bounded(ctx, "count_pokemons", async {
            let conn = self.connection().await?;
            let mut rows = conn.query("SELECT COUNT(*) FROM pokemons", ()).await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            let count = row.get::<i64>(0)?;
            u64::try_from(count)
                .map_err(|_| DatabaseError::Query(format!("negative row count {count}")))
        })
        .await
    }

    /// Delete the pokemon with `id` and return the row as it was.
    ///
    /// Runs as a single `DELETE ... RETURNING` statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has that id, and
    /// `DatabaseError` if the statement fails or the returned row does not
    /// parse.
    pub async fn delete_pokemon_by_id(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<Pokemon, DatabaseError> {
        self.bounded(ctx, "delete_pokemon_by_id", async {
            let conn = self.connection().await?;
            let mut rows = conn
                .query(
                    &format!("DELETE FROM pokemons WHERE id = ?1 RETURNING {POKEMON_COLUMNS}"),
                    libsql::params![id],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NotFound { id })?;
            row_to_pokemon(&row)
        })
        .await
    }
}
