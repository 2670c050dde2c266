use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `dexd` binary.
#[derive(Debug, Parser)]
#[command(name = "dexd", version, about = "Pokedex integration service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file layered over ./dex.toml and the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Listen address, overrides server.bind_addr
    #[arg(short, long, global = true)]
    pub bind: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

impl Cli {
    #[must_use]
    pub fn action(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
