//! # dex-db
//!
//! libSQL persistence for integrated pokemon.
//!
//! One table, `pokemons`, keyed by the PokeAPI id. Local files and remote
//! (`libsql://`, `http(s)://`) databases are both supported; connections
//! come from a `deadpool` [`Pool`]. Every operation takes a
//! [`RequestContext`] and gives up with [`DatabaseError::Timeout`] once its
//! deadline passes, including time spent waiting for a connection.

pub mod error;
pub mod helpers;
mod migrations;
pub mod pool;
pub mod repos;

use std::fmt;
use std::future::Future;

use dex_config::DatabaseConfig;
use dex_core::context::RequestContext;
use error::DatabaseError;
use libsql::Builder;
use pool::{Pool, PooledConnection};

/// Central database handle for the pokemon store.
///
/// Clones share the same pool.
#[derive(Clone)]
pub struct PokedexDb {
    pool: Pool,
    max_idle: usize,
}

impl fmt::Debug for PokedexDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.pool.status();
        f.debug_struct("PokedexDb")
            .field("max_connections", &status.max_size)
            .field("open", &status.size)
            .field("idle", &status.available)
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

impl PokedexDb {
    /// Open the database described by `config` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InMemory` for `:memory:` URLs, or another
    /// `DatabaseError` if the database cannot be opened or migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_in_memory() {
            return Err(DatabaseError::InMemory {
                url: config.url.clone(),
            });
        }

        let db = if config.is_remote() {
            Builder::new_remote(config.url.clone(), config.auth_token.clone())
                .build()
                .await?
        } else {
            Builder::new_local(config.url.as_str()).build().await?
        };

        let pokedex = Self {
            pool: pool::build(db, config)?,
            max_idle: usize::try_from(config.max_idle_connections).unwrap_or(usize::MAX),
        };
        pokedex.run_migrations().await?;
        pokedex.trim_idle();
        tracing::debug!(
            remote = config.is_remote(),
            max_connections = pokedex.pool.status().max_size,
            "opened pokedex database"
        );
        Ok(pokedex)
    }

    /// Open a local database file with default pool limits.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file cannot be opened or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open(&DatabaseConfig::local(path)).await
    }

    #[must_use]
    pub const fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Check out a connection, waiting for a free slot if the pool is full.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::PoolClosed` after [`close`](Self::close), or
    /// `DatabaseError::LibSql` if a new connection cannot be opened.
    pub async fn connection(&self) -> Result<PooledConnection, DatabaseError> {
        Ok(self.pool.get().await?)
    }

    /// Drop idle connections down to `max_idle_connections`.
    pub fn trim_idle(&self) {
        pool::trim_idle(&self.pool, self.max_idle);
    }

    /// Refuse further checkouts and close idle connections.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Run `op` under the caller's deadline.
    pub(crate) async fn bounded<T>(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        fut: impl Future<Output = Result<T, DatabaseError>>,
    ) -> Result<T, DatabaseError> {
        let result = ctx.scope(fut).await.unwrap_or_else(|_| {
            tracing::warn!(op, "database deadline exceeded");
            Err(DatabaseError::Timeout)
        });
        self.trim_idle();
        result
    }
}
