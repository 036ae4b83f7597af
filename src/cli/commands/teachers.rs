use super::public_backend;
use crate::api::Backend;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

/// Public teacher list, the ids parents pass to `spot query --teacher`.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let api = public_backend(cfg)?;
    let teachers = api.public_teachers()?;

    if teachers.is_empty() {
        info("No teachers registered yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("Name", 32),
        Column::new("Specialty", 32),
    ]);
    for t in &teachers {
        table.add_row(vec![
            t.id.to_string(),
            t.name.clone(),
            t.specialty.clone().unwrap_or_default(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
