use super::{public_backend, read_line};
use crate::api::HttpBackend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{self, TokenStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Handle `login`, `logout` and `whoami`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = TokenStore::from_config(cfg);

    match cmd {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => read_line("Password: ")?,
            };
            let api = public_backend(cfg)?;
            let user = session::login(&api, &store, email, &password)?;
            success(format!(
                "Logged in as {} ({})",
                user.name,
                user.role.as_str()
            ));
        }
        Commands::Logout => {
            if session::logout(&store)? {
                success("Logged out.");
            } else {
                info("No active session.");
            }
        }
        Commands::Whoami => {
            let token = session::valid_token(&store)?.ok_or(AppError::Unauthorized)?;
            let api = HttpBackend::from_config(cfg, Some(token))?;
            let user = session::current_user(&api, &store)?;
            println!("👤 {}", user.name);
            if let Some(email) = &user.email {
                println!("   Email : {email}");
            }
            println!("   Role  : {}", user.role.as_str());
            println!("   Id    : {}", user.id);
        }
        _ => {}
    }
    Ok(())
}
