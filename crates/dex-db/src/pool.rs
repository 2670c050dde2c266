//! libSQL connection pooling on top of `deadpool`.
//!
//! [`LibsqlManager`] opens connections to one `libsql::Database` and refuses
//! to recycle any connection older than `max_lifetime`. The checkout limit is
//! deadpool's `max_size`. deadpool has no idle cap of its own, so
//! [`trim_idle`] closes idle connections beyond `max_idle` (and expired ones)
//! after each store operation.

use std::fmt;
use std::time::Duration;

use deadpool::Runtime;
use deadpool::managed::{self, Metrics, PoolError, RecycleError, RecycleResult};
use dex_config::DatabaseConfig;

use crate::error::DatabaseError;

pub type Pool = managed::Pool<LibsqlManager>;
pub type PooledConnection = managed::Object<LibsqlManager>;

/// deadpool manager for connections to a single libSQL database.
pub struct LibsqlManager {
    db: libsql::Database,
    busy_timeout: Option<Duration>,
    max_lifetime: Duration,
}

impl fmt::Debug for LibsqlManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibsqlManager")
            .field("busy_timeout", &self.busy_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .finish_non_exhaustive()
    }
}

impl LibsqlManager {
    /// `busy_timeout` is only applied to local databases; remote servers
    /// handle locking themselves.
    #[must_use]
    pub fn new(db: libsql::Database, config: &DatabaseConfig) -> Self {
        Self {
            db,
            busy_timeout: (!config.is_remote()).then(|| config.busy_timeout()),
            max_lifetime: config.max_lifetime(),
        }
    }

    #[must_use]
    pub const fn max_lifetime(&self) -> Duration {
        self.max_lifetime
    }
}

impl managed::Manager for LibsqlManager {
    type Type = libsql::Connection;
    type Error = libsql::Error;

    async fn create(&self) -> Result<libsql::Connection, libsql::Error> {
        let conn = self.db.connect()?;
        if let Some(timeout) = self.busy_timeout {
            // PRAGMA busy_timeout echoes the new value as a row.
            conn.query(&format!("PRAGMA busy_timeout = {}", timeout.as_millis()), ())
                .await?;
        }
        tracing::trace!("opened database connection");
        Ok(conn)
    }

    async fn recycle(
        &self,
        _conn: &mut libsql::Connection,
        metrics: &Metrics,
    ) -> RecycleResult<libsql::Error> {
        if metrics.created.elapsed() >= self.max_lifetime {
            return Err(RecycleError::Message(
                "connection exceeded database.max_lifetime_secs".into(),
            ));
        }
        Ok(())
    }
}

/// Build the pool for `db` with the limits from `config`.
///
/// # Errors
///
/// Returns `DatabaseError::Pool` if deadpool rejects the settings.
pub fn build(db: libsql::Database, config: &DatabaseConfig) -> Result<Pool, DatabaseError> {
    let max_size = usize::try_from(config.max_connections)
        .unwrap_or(usize::MAX)
        .max(1);
    managed::Pool::builder(LibsqlManager::new(db, config))
        .max_size(max_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| DatabaseError::Pool(e.to_string()))
}

/// Close idle connections beyond `max_idle` and any that have expired.
pub fn trim_idle(pool: &Pool, max_idle: usize) {
    let max_lifetime = pool.manager().max_lifetime();
    let mut kept = 0;
    let result = pool.retain(|_, metrics| {
        let keep = kept < max_idle && metrics.created.elapsed() < max_lifetime;
        if keep {
            kept += 1;
        }
        keep
    });
    if !result.removed.is_empty() {
        tracing::trace!(closed = result.removed.len(), "closed idle database connections");
    }
}

impl From<PoolError<libsql::Error>> for DatabaseError {
    fn from(err: PoolError<libsql::Error>) -> Self {
        match err {
            PoolError::Backend(e) => Self::LibSql(e),
            PoolError::Closed => Self::PoolClosed,
            PoolError::Timeout(_) => Self::Timeout,
            other => Self::Pool(other.to_string()),
        }
    }
}
