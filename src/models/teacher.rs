use super::id::TeacherId;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Teacher as listed on the public home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherCard {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Teacher as seen by the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Create/update body. `password` is sent on create only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeacherInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TeacherInput {
    pub fn validate_for_create(&self) -> AppResult<()> {
        self.validate_common()?;
        match &self.password {
            Some(p) if !p.is_empty() => Ok(()),
            _ => Err(AppError::validation("password required")),
        }
    }

    pub fn validate_for_update(&self) -> AppResult<()> {
        self.validate_common()
    }

    fn validate_common(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("teacher name required"));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::validation("email required"));
        }
        Ok(())
    }

    /// Copy of an existing record, ready to be edited.
    pub fn from_teacher(t: &Teacher) -> Self {
        Self {
            name: t.name.clone(),
            specialty: t.specialty.clone(),
            email: t.email.clone(),
            avatar_url: t.avatar_url.clone(),
            password: None,
        }
    }
}
