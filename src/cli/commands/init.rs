use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` command
///
/// Creates the config directory (if missing) and writes the default
/// configuration file there. An existing file is kept unless `--force`.
pub fn handle(cmd: &Commands, dir: &Path) -> AppResult<()> {
    if let Commands::Init { api_url, force } = cmd {
        let existed = Config::file_in(dir).exists();

        println!("⚙️  Initializing spot…");
        let cfg = Config::init_all(dir, api_url.as_deref(), *force)?;

        println!("📄 Config file : {}", cfg.config_file().display());
        println!("🌐 Backend     : {}", cfg.api_base_url);

        if existed && !*force {
            info("Configuration already present, left unchanged (use --force to reset).");
        } else {
            success("Configuration file written.");
        }
    }
    Ok(())
}
