//! One handler per subcommand, plus the helpers they share.

pub mod admin;
pub mod auth;
pub mod config;
pub mod editor;
pub mod init;
pub mod query;
pub mod reports;
pub mod students;
pub mod teachers;

use crate::api::HttpBackend;
use crate::config::Config;
use crate::core::session::{self, TokenStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Grid, Report, Role, UserProfile};
use crate::ui::messages::warning;
use crate::utils::colors::dim;
use crate::utils::table::{Column, Table};
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// One line from stdin, used for passwords not given on the command line.
pub(crate) fn read_line(prompt: &str) -> AppResult<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}

/// Client without credentials, for the public endpoints.
pub(crate) fn public_backend(cfg: &Config) -> AppResult<HttpBackend> {
    HttpBackend::from_config(cfg, None)
}

/// Client for a logged-in user of `role`. Fails before any request when no
/// usable token is stored.
pub(crate) fn signed_in(cfg: &Config, role: Role) -> AppResult<(HttpBackend, UserProfile)> {
    let store = TokenStore::from_config(cfg);
    let token = session::valid_token(&store)?.ok_or(AppError::Unauthorized)?;
    let api = HttpBackend::from_config(cfg, Some(token))?;
    let user = session::current_user(&api, &store)?;
    session::require_role(&user, role)?;
    Ok((api, user))
}

pub(crate) fn grid_table(grid: &Grid) -> Table {
    let mut columns = vec![Column::new("#", 3), Column::new("Row", 24)];
    columns.extend(grid.columns().iter().map(|c| Column::new(c, 18)));

    let mut table = Table::new(columns);
    for (i, row) in grid.rows().iter().enumerate() {
        let mut line = vec![i.to_string(), row.label.clone()];
        line.extend(row.cells.iter().cloned());
        table.add_row(line);
    }
    table
}

pub(crate) fn print_grid(grid: &Grid) {
    if grid.is_empty() {
        println!("{}", dim("(no rows yet)"));
        return;
    }
    print!("{}", grid_table(grid).render());
}

pub(crate) fn print_report(report: &Report) {
    println!("📄 {}", report.title);
    let updated = report
        .updated_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "   Report: {}  |  Updated: {}  |  id {}\n",
        report.report_identifier, updated, report.id
    );
    print_grid(&report.grid);
}
