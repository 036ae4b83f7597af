use super::{ask_confirmation, read_line, signed_in};
use crate::cli::parser::{AdminCmd, Commands};
use crate::config::Config;
use crate::core::teachers;
use crate::errors::AppResult;
use crate::models::{Role, TeacherInput};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Admin { action } = cmd else {
        return Ok(());
    };
    let (api, _admin) = signed_in(cfg, Role::Admin)?;

    match action {
        AdminCmd::List => {
            let list = teachers::list(&api)?;
            if list.is_empty() {
                info("No teacher accounts.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("ID", 10),
                Column::new("Name", 28),
                Column::new("Email", 32),
                Column::new("Specialty", 24),
            ]);
            for t in &list {
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    t.email.clone(),
                    t.specialty.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
        AdminCmd::Add {
            name,
            email,
            password,
            specialty,
            avatar_url,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => read_line("Password for the new account: ")?,
            };
            let input = TeacherInput {
                name: name.trim().to_string(),
                specialty: specialty.clone(),
                email: email.trim().to_string(),
                avatar_url: avatar_url.clone(),
                password: Some(password),
            };
            teachers::create(&api, &input)?;
            success(format!("Teacher {} created.", input.name));
        }
        AdminCmd::Edit {
            id,
            name,
            email,
            specialty,
            avatar_url,
        } => {
            let current = teachers::find(&api, id)?;
            let mut input = TeacherInput::from_teacher(&current);
            if let Some(n) = name {
                input.name = n.trim().to_string();
            }
            if let Some(e) = email {
                input.email = e.trim().to_string();
            }
            if specialty.is_some() {
                input.specialty = specialty.clone();
            }
            if avatar_url.is_some() {
                input.avatar_url = avatar_url.clone();
            }
            teachers::update(&api, id, &input)?;
            success(format!("Teacher {id} updated."));
        }
        AdminCmd::Del { id, yes } => {
            if !*yes && !ask_confirmation(&format!("Delete teacher account {id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }
            teachers::delete(&api, id)?;
            success(format!("Teacher {id} deleted."));
        }
    }
    Ok(())
}
