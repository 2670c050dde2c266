//! Errors raised while loading or validating `DexConfig`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `DEX_*` variable could not be read into `DexConfig`,
    /// e.g. `DEX_DATABASE__MAX_CONNECTIONS=lots`.
    #[error("failed to load dex configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section `dexd` cannot start without is empty (today only
    /// `database`, when `database.url` is blank).
    #[error("'{section}' is not configured; set it in dex.toml or via DEX_{}__*", .section.to_uppercase())]
    NotConfigured { section: String },

    /// A value parsed but cannot be used, such as a zero pool size or an
    /// in-memory database URL. `field` is the dotted path, e.g.
    /// `database.max_connections`.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
