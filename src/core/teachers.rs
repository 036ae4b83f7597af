//! Admin management of teacher accounts.

use crate::api::Backend;
use crate::errors::{AppError, AppResult};
use crate::models::{Teacher, TeacherId, TeacherInput};
use tracing::info;

pub fn list(api: &dyn Backend) -> AppResult<Vec<Teacher>> {
    let mut teachers = api.list_teachers()?;
    teachers.sort_by_key(|t| t.name.to_lowercase());
    Ok(teachers)
}

/// `input.password` is required here.
pub fn create(api: &dyn Backend, input: &TeacherInput) -> AppResult<()> {
    input.validate_for_create()?;
    api.create_teacher(input)?;
    info!(email = %input.email, "teacher created");
    Ok(())
}

/// Any password in `input` is dropped; updates never change it.
pub fn update(api: &dyn Backend, id: &TeacherId, input: &TeacherInput) -> AppResult<()> {
    let body = TeacherInput {
        password: None,
        ..input.clone()
    };
    body.validate_for_update()?;
    api.update_teacher(id, &body)?;
    info!(teacher = %id, "teacher updated");
    Ok(())
}

pub fn delete(api: &dyn Backend, id: &TeacherId) -> AppResult<()> {
    api.delete_teacher(id)?;
    info!(teacher = %id, "teacher deleted");
    Ok(())
}

/// Record to edit, looked up in the admin list.
pub fn find(api: &dyn Backend, id: &TeacherId) -> AppResult<Teacher> {
    api.list_teachers()?
        .into_iter()
        .find(|t| &t.id == id)
        .ok_or_else(|| AppError::NotFound(format!("teacher {id}")))
}
