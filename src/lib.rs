//! spot library root.
//! Exposes the CLI parser, the high-level run() function, and the view
//! logic the terminal front-end drives.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, &cfg.dir),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::auth::handle(&cli.command, cfg)
        }
        Commands::Students { .. } => cli::commands::students::handle(&cli.command, cfg),
        Commands::Reports { .. } => cli::commands::reports::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::editor::handle(&cli.command, cfg),
        Commands::Teachers => cli::commands::teachers::handle(cfg),
        Commands::Query { .. } => cli::commands::query::handle(&cli.command, cfg),
        Commands::Admin { .. } => cli::commands::admin::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let dir = Config::resolve_dir(cli.config_dir.as_deref());

    // `init` must work even when the existing file no longer parses
    if let Commands::Init { .. } = &cli.command {
        utils::logging::init_standard_tracing("spot", "warn");
        return cli::commands::init::handle(&cli.command, &dir);
    }

    let cfg = Config::load_from(&dir)?;
    utils::logging::init_standard_tracing("spot", &cfg.log_level);
    tracing::debug!(dir = %dir.display(), api = %cfg.api_base_url, "configuration loaded");

    dispatch(&cli, &cfg)
}
