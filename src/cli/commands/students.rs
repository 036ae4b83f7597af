use super::{ask_confirmation, signed_in};
use crate::cli::parser::{Commands, StudentsCmd};
use crate::config::Config;
use crate::core::{StudentDirectory, roster};
use crate::errors::AppResult;
use crate::models::Role;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Students { action } = cmd else {
        return Ok(());
    };
    let (api, _user) = signed_in(cfg, Role::Teacher)?;
    let mut directory = StudentDirectory::new();
    directory.load(&api)?;

    match action {
        StudentsCmd::List { search } => {
            let found = directory.search(search.as_deref().unwrap_or(""));
            if found.is_empty() {
                info("No students found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 10),
                Column::new("Code", 14),
                Column::new("Name", 40),
                Column::new("Created", 10),
            ]);
            for s in found {
                table.add_row(vec![
                    s.id.to_string(),
                    s.code.clone(),
                    s.name.clone(),
                    s.created_at
                        .map(|t| t.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
        StudentsCmd::Add { name, code } => {
            roster::create_student(&api, &mut directory, name, code)?;
            success(format!("Student {} added.", code.trim()));
        }
        StudentsCmd::Edit { id, name, code } => {
            roster::update_student(&api, &mut directory, id, name.as_deref(), code.as_deref())?;
            success(format!("Student {id} updated."));
        }
        StudentsCmd::Del { id, yes } => {
            let label = directory
                .get(id)
                .map(|s| s.label())
                .unwrap_or_else(|| format!("#{id}"));
            let prompt = format!("Delete student {label} and all of their reports?");
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
            roster::delete_student(&api, &mut directory, id)?;
            success(format!("Student {label} deleted."));
        }
    }
    Ok(())
}
