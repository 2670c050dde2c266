//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::PokedexDb;
use crate::error::DatabaseError;

/// `pokemons` table and its name index.
const MIGRATION_001: &str = include_str!("../migrations/001_pokemons.sql");

impl PokedexDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let conn = self.connection().await?;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_pokemons: {e}")))?;
        Ok(())
    }
}
