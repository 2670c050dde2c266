//! libSQL store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "pokedex.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_max_idle_connections() -> u32 {
    5
}

const fn default_max_lifetime_secs() -> u64 {
    300
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file path, or a `libsql://` / `https://` URL for a
    /// remote libSQL (Turso) database.
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases. Ignored for local files.
    #[serde(default)]
    pub auth_token: String,

    /// Upper bound on connections checked out at the same time.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connections kept open between requests.
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: u32,

    /// Connections older than this are closed instead of reused, in seconds.
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,

    /// How long a local connection waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
            max_connections: default_max_connections(),
            max_idle_connections: default_max_idle_connections(),
            max_lifetime_secs: default_max_lifetime_secs(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// A local database at `path` with default pool settings.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            url: path.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Whether `url` points at a remote libSQL server rather than a file.
    pub fn is_remote(&self) -> bool {
        ["libsql://", "http://", "https://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Whether `url` names an in-memory database.
    ///
    /// SQLite gives every connection to `:memory:` its own private database,
    /// so a pooled store cannot share one.
    pub fn is_in_memory(&self) -> bool {
        let url = self.url.trim();
        url.contains(":memory:") || url.contains("mode=memory")
    }

    pub const fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
