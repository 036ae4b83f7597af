//! Report list for one student: delete with confirmation, hand off to the
//! editor.

use super::workflow::EditHandoff;
use crate::errors::{AppError, AppResult};
use crate::models::{ReportId, ReportSummary, Student};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
enum Listing {
    NoStudent,
    Loading,
    Loaded(Vec<ReportSummary>),
}

/// What the list area shows.
#[derive(Debug, PartialEq)]
pub enum ListState<'a> {
    NoStudent,
    Loading,
    Empty,
    Reports(&'a [ReportSummary]),
}

#[derive(Debug)]
pub struct ListTicket {
    generation: u64,
    pub student: Student,
}

#[derive(Debug)]
pub struct DeleteTicket {
    generation: u64,
    pub report_id: ReportId,
}

#[derive(Debug)]
pub struct ReportList {
    student: Option<Student>,
    listing: Listing,
    /// Report awaiting the user's confirmation.
    confirm: Option<ReportId>,
    deleting: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for ReportList {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportList {
    pub fn new() -> Self {
        Self {
            student: None,
            listing: Listing::NoStudent,
            confirm: None,
            deleting: false,
            error: None,
            generation: 0,
        }
    }

    pub fn student(&self) -> Option<&Student> {
        self.student.as_ref()
    }

    pub fn state(&self) -> ListState<'_> {
        match &self.listing {
            Listing::NoStudent => ListState::NoStudent,
            Listing::Loading => ListState::Loading,
            Listing::Loaded(r) if r.is_empty() => ListState::Empty,
            Listing::Loaded(r) => ListState::Reports(r),
        }
    }

    pub fn reports(&self) -> &[ReportSummary] {
        match &self.listing {
            Listing::Loaded(r) => r,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_confirmation(&self) -> Option<&ReportId> {
        self.confirm.as_ref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// `None` clears the list; otherwise a fetch for the new student starts.
    pub fn select_student(&mut self, student: Option<Student>) -> Option<ListTicket> {
        self.generation += 1;
        self.student = student;
        self.confirm = None;
        self.error = None;
        match &self.student {
            None => {
                self.listing = Listing::NoStudent;
                None
            }
            Some(_) => self.refresh(),
        }
    }

    /// Re-fetch for the current student.
    pub fn refresh(&mut self) -> Option<ListTicket> {
        let student = self.student.clone()?;
        self.listing = Listing::Loading;
        Some(ListTicket {
            generation: self.generation,
            student,
        })
    }

    /// Ok(false) for a ticket issued before the student changed.
    pub fn complete_list(
        &mut self,
        ticket: ListTicket,
        result: AppResult<Vec<ReportSummary>>,
    ) -> AppResult<bool> {
        if ticket.generation != self.generation {
            debug!(student = %ticket.student.id, "dropping stale report list");
            return Ok(false);
        }

        match result {
            Ok(reports) => {
                self.listing = Listing::Loaded(reports);
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                warn!(student = %ticket.student.id, "listing reports failed: {e}");
                self.listing = Listing::Loaded(Vec::new());
                self.error = Some(e.user_message("Failed to load the report list"));
                Err(e)
            }
        }
    }

    fn find(&self, id: &ReportId) -> AppResult<&ReportSummary> {
        self.reports()
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("report {id} is not in this list")))
    }

    /// Opens the confirmation step. Ignored while a delete is running.
    pub fn request_delete(&mut self, id: &ReportId) -> AppResult<()> {
        if self.deleting {
            return Ok(());
        }
        self.find(id)?;
        self.confirm = Some(id.clone());
        Ok(())
    }

    /// Closing the dialog is refused while the delete is in flight.
    pub fn cancel_delete(&mut self) -> bool {
        if self.deleting {
            return false;
        }
        self.confirm = None;
        true
    }

    /// Issues the delete once; further confirms are no-ops until it completes.
    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        if self.deleting {
            return None;
        }
        let report_id = self.confirm.clone()?;
        self.deleting = true;
        Some(DeleteTicket {
            generation: self.generation,
            report_id,
        })
    }

    /// On success the dialog closes and a re-fetch ticket is returned. On
    /// failure the list stays as it was and an error banner is set.
    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: AppResult<()>,
    ) -> AppResult<Option<ListTicket>> {
        self.deleting = false;

        if ticket.generation != self.generation {
            debug!(report = %ticket.report_id, "delete finished after the student changed");
            return result.map(|_| None);
        }

        match result {
            Ok(()) => {
                self.confirm = None;
                Ok(self.refresh())
            }
            Err(e) => {
                warn!(report = %ticket.report_id, "delete failed: {e}");
                self.error = Some(e.user_message("Failed to delete the report"));
                Err(e)
            }
        }
    }

    /// Hand-off for the editor, with the persisted and human identifiers.
    pub fn edit(&self, id: &ReportId) -> AppResult<EditHandoff> {
        let student = self
            .student
            .clone()
            .ok_or_else(|| AppError::validation("no student selected"))?;
        let summary = self.find(id)?;

        Ok(EditHandoff {
            student,
            persisted_id: summary.id.clone(),
            report_identifier: summary.report_identifier.clone(),
            report: None,
        })
    }
}
