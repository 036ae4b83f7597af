use super::id::StudentId;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Chosen by the teacher, unique in their roster. Parents query with it.
    pub code: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    /// "Name (CODE)", as shown in selectors.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// Case-insensitive substring match on name or code.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.code.to_lowercase().contains(&q)
    }
}

/// Body of create/update student calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentInput {
    pub name: String,
    pub code: String,
}

impl StudentInput {
    pub fn new(name: &str, code: &str) -> AppResult<Self> {
        let input = Self {
            name: name.trim().to_string(),
            code: code.trim().to_string(),
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("student name required"));
        }
        if self.code.trim().is_empty() {
            return Err(AppError::validation("student code required"));
        }
        Ok(())
    }
}
