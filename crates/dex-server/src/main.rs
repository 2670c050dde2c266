use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use dex_config::DexConfig;
use dex_db::PokedexDb;
use dex_server::{AppState, build_router};
use dex_service::PokemonService;
use dex_source::PokeApiClient;

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("dexd error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config =
        DexConfig::load_with_dotenv(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = &cli.bind {
        config.server.bind_addr.clone_from(bind);
    }
    config.validate().context("invalid configuration")?;

    let store = PokedexDb::open(&config.database)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.url))?;

    match cli.action() {
        Command::Migrate => {
            tracing::info!(url = %config.database.url, "migrations applied");
            Ok(())
        }
        Command::Serve => serve(config, store).await,
    }
}

async fn serve(config: DexConfig, store: PokedexDb) -> anyhow::Result<()> {
    if !config.pokeapi.is_configured() {
        tracing::warn!("pokeapi.base_url is not set; integrate requests will fail");
    }

    let source = PokeApiClient::new(&config.pokeapi).context("failed to build PokeAPI client")?;
    let service = PokemonService::new(source, store.clone());
    let state = AppState::new(service, config.server.request_timeout());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "dexd listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    store.close();
    tracing::info!("dexd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, draining connections");
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DEX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
