//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and working-directory
//! manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use dex_config::DexConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_pokeapi_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[pokeapi]
base_url = "https://pokeapi.co/api/v2/pokemon"
timeout_secs = 3
user_agent = "dex-test"
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.pokeapi.base_url, "https://pokeapi.co/api/v2/pokemon");
        assert_eq!(config.pokeapi.timeout_secs, 3);
        assert_eq!(config.pokeapi.user_agent, "dex-test");
        assert!(config.pokeapi.is_configured());
        Ok(())
    });
}

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "libsql://pokedex-org.turso.io"
auth_token = "db-token"
max_connections = 20
max_idle_connections = 4
max_lifetime_secs = 60
busy_timeout_ms = 250
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.url, "libsql://pokedex-org.turso.io");
        assert_eq!(config.database.auth_token, "db-token");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.max_idle_connections, 4);
        assert_eq!(config.database.max_lifetime_secs, 60);
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert!(config.database.is_remote());
        config.validate().expect("should validate");
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind_addr = "127.0.0.1:8080"
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.pokeapi.timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dex.toml",
            r#"
[pokeapi]
base_url = "http://localhost:9999/pokemon"
"#,
        )?;

        let config = DexConfig::load(None).expect("config loads");
        assert_eq!(config.pokeapi.base_url, "http://localhost:9999/pokemon");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dex.toml",
            r#"
[server]
bind_addr = "127.0.0.1:1111"
request_timeout_secs = 5
"#,
        )?;
        jail.create_file(
            "override.toml",
            r#"
[server]
bind_addr = "127.0.0.1:2222"
"#,
        )?;

        let config =
            DexConfig::load(Some(std::path::Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.server.bind_addr, "127.0.0.1:2222");
        // Not overridden by the explicit file.
        assert_eq!(config.server.request_timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("DEX_DATABASE__URL", "/var/lib/dex/from-env.db");

        jail.create_file(
            "config.toml",
            r#"
[database]
url = "from-toml.db"
max_connections = 3
max_idle_connections = 1
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("DEX_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.database.url, "/var/lib/dex/from-env.db");
        // TOML value not overridden by env should remain
        assert_eq!(config.database.max_connections, 3);
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dex.toml",
            r#"
[database]
max_connections = "lots"
"#,
        )?;

        let err = DexConfig::load(None).unwrap_err();
        assert!(matches!(err, dex_config::ConfigError::Figment(_)));
        Ok(())
    });
}
