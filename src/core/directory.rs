//! In-memory copy of the teacher's student roster.
//!
//! Loaded once per dashboard session and handed to views by shared
//! reference; only `refresh` replaces the contents.

use crate::api::Backend;
use crate::errors::AppResult;
use crate::models::{Student, StudentId};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct StudentDirectory {
    students: Vec<Student>,
    loaded: bool,
    pending: usize,
    last_error: Option<String>,
}

impl StudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the roster. A failure leaves the previous contents in place and
    /// is kept as a banner message; there is no retry.
    pub fn load(&mut self, api: &dyn Backend) -> AppResult<&[Student]> {
        self.begin_refresh();
        let result = api.list_students();
        self.complete_refresh(result)?;
        Ok(&self.students)
    }

    pub fn refresh(&mut self, api: &dyn Backend) -> AppResult<()> {
        self.load(api).map(|_| ())
    }

    /// Marks a fetch as in flight. Search and selection controls should stay
    /// disabled while [`is_loading`](Self::is_loading) is true.
    pub fn begin_refresh(&mut self) {
        self.pending += 1;
    }

    /// Last completion wins; overlapping refreshes are not de-duplicated.
    pub fn complete_refresh(&mut self, result: AppResult<Vec<Student>>) -> AppResult<()> {
        self.pending = self.pending.saturating_sub(1);

        match result {
            Ok(students) => {
                debug!(count = students.len(), "student directory refreshed");
                self.students = students;
                self.loaded = true;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("student directory refresh failed: {e}");
                self.last_error = Some(e.user_message("Failed to load the student list"));
                Err(e)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn find_by_code(&self, code: &str) -> Option<&Student> {
        let code = code.trim();
        self.students
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code))
    }

    /// Students whose name or code contains `query`; everything when empty.
    pub fn search(&self, query: &str) -> Vec<&Student> {
        let query = query.trim();
        if query.is_empty() {
            return self.students.iter().collect();
        }
        self.students.iter().filter(|s| s.matches(query)).collect()
    }
}
