//! # dex-config
//!
//! Layered configuration loading for the Pokedex service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DEX_*` prefix, `__` as separator)
//! 2. An explicit config file passed on the command line
//! 3. Project-level `dex.toml` in the working directory
//! 4. User-level `~/.config/dex/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DEX_POKEAPI__BASE_URL` -> `pokeapi.base_url`,
//! `DEX_DATABASE__MAX_CONNECTIONS` -> `database.max_connections`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use dex_config::DexConfig;
//!
//! let config = DexConfig::load_with_dotenv(None).expect("config");
//! config.validate().expect("valid config");
//!
//! if !config.pokeapi.is_configured() {
//!     eprintln!("DEX_POKEAPI__BASE_URL is not set");
//! }
//! ```

mod database;
mod error;
mod pokeapi;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use pokeapi::PokeApiConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DexConfig {
    #[serde(default)]
    pub pokeapi: PokeApiConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl DexConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(config_file)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the working directory's `.env` before building the
    /// figment. This is the entry point used by the `dexd` binary.
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("dex.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file from the command line
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("DEX_").split("__"))
    }

    /// Reject values no component can run with.
    ///
    /// The PokeAPI base URL is deliberately not required here: an unset URL
    /// is reported per request by the integration pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        if self.database.is_in_memory() {
            return Err(invalid(
                "database.url",
                "in-memory databases are not shared between pooled connections; use a file path",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(invalid("database.max_connections", "must be at least 1"));
        }
        if self.database.max_idle_connections > self.database.max_connections {
            return Err(invalid(
                "database.max_idle_connections",
                "must not exceed database.max_connections",
            ));
        }
        if self.database.max_lifetime_secs == 0 {
            return Err(invalid("database.max_lifetime_secs", "must be at least 1"));
        }
        if self.pokeapi.timeout_secs == 0 {
            return Err(invalid("pokeapi.timeout_secs", "must be at least 1"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dex").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
