//! Teacher-side student CRUD. Every successful change re-fetches the
//! directory so views see the server's version of the roster.

use super::directory::StudentDirectory;
use crate::api::Backend;
use crate::errors::{AppError, AppResult};
use crate::models::{Student, StudentId, StudentInput};
use tracing::{info, warn};

pub fn create_student(
    api: &dyn Backend,
    directory: &mut StudentDirectory,
    name: &str,
    code: &str,
) -> AppResult<()> {
    let input = StudentInput::new(name, code)?;
    api.create_student(&input)?;
    info!(code = %input.code, "student created");
    refresh_after_change(api, directory);
    Ok(())
}

/// Fields left `None` keep their current value.
pub fn update_student(
    api: &dyn Backend,
    directory: &mut StudentDirectory,
    id: &StudentId,
    name: Option<&str>,
    code: Option<&str>,
) -> AppResult<()> {
    let current = known_student(directory, id)?;
    let input = StudentInput::new(
        name.unwrap_or(&current.name),
        code.unwrap_or(&current.code),
    )?;

    api.update_student(id, &input)?;
    info!(student = %id, "student updated");
    refresh_after_change(api, directory);
    Ok(())
}

/// The server also drops the student's reports.
pub fn delete_student(
    api: &dyn Backend,
    directory: &mut StudentDirectory,
    id: &StudentId,
) -> AppResult<()> {
    api.delete_student(id)?;
    info!(student = %id, "student deleted");
    refresh_after_change(api, directory);
    Ok(())
}

fn known_student(directory: &StudentDirectory, id: &StudentId) -> AppResult<Student> {
    directory
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("student {id} is not in your roster")))
}

/// The change itself went through; a failed re-fetch only leaves the banner.
fn refresh_after_change(api: &dyn Backend, directory: &mut StudentDirectory) {
    if let Err(e) = directory.refresh(api) {
        warn!("roster changed but the directory could not be refreshed: {e}");
    }
}
