//! Synchronous drivers: each one runs begin → backend call → complete on a
//! view, so callers get a single entry point per user action.

use super::manage::{ListTicket, ReportList};
use super::query::PublicQuery;
use super::workflow::{EditHandoff, ReportWorkflow};
use crate::api::Backend;
use crate::errors::AppResult;
use crate::export::{DocumentRenderer, ExportFormat, ExportLogic};
use crate::models::Student;
use std::path::Path;

pub struct ReportController<'a> {
    api: &'a dyn Backend,
}

impl<'a> ReportController<'a> {
    pub fn new(api: &'a dyn Backend) -> Self {
        Self { api }
    }

    /// Ok(false) when saving is currently disabled. Local validation
    /// failures come back as errors without any request being sent.
    pub fn save(&self, wf: &mut ReportWorkflow) -> AppResult<bool> {
        let Some(ticket) = wf.begin_save()? else {
            return Ok(false);
        };
        let result = self.api.save_report(&ticket.request);
        wf.complete_save(ticket, result)
    }

    /// Opens an existing report, fetching it when the handoff has no grid.
    pub fn open(&self, wf: &mut ReportWorkflow, handoff: EditHandoff) -> AppResult<bool> {
        let Some(ticket) = wf.open_existing(handoff) else {
            return Ok(true);
        };
        let result = self.api.get_report(&ticket.persisted_id);
        wf.complete_load(ticket, result)
    }
}

pub struct ManageController<'a> {
    api: &'a dyn Backend,
}

impl<'a> ManageController<'a> {
    pub fn new(api: &'a dyn Backend) -> Self {
        Self { api }
    }

    pub fn select(&self, list: &mut ReportList, student: Option<Student>) -> AppResult<()> {
        let ticket = list.select_student(student);
        self.load(list, ticket)
    }

    pub fn load(&self, list: &mut ReportList, ticket: Option<ListTicket>) -> AppResult<()> {
        let Some(ticket) = ticket else {
            return Ok(());
        };
        let result = self.api.list_reports(&ticket.student.id);
        list.complete_list(ticket, result).map(|_| ())
    }

    /// Runs the confirmed delete and re-fetches on success. Ok(false) when
    /// nothing was confirmed or a delete is already running.
    pub fn delete_confirmed(&self, list: &mut ReportList) -> AppResult<bool> {
        let Some(ticket) = list.confirm_delete() else {
            return Ok(false);
        };
        let result = self.api.delete_report(&ticket.report_id);
        let refetch = list.complete_delete(ticket, result)?;
        self.load(list, refetch)?;
        Ok(true)
    }
}

pub struct QueryController<'a> {
    api: &'a dyn Backend,
}

impl<'a> QueryController<'a> {
    pub fn new(api: &'a dyn Backend) -> Self {
        Self { api }
    }

    pub fn run(&self, view: &mut PublicQuery, code: &str) -> AppResult<()> {
        let ticket = view.begin_query(code)?;
        let teacher = view.teacher().id.clone();
        let result = self.api.query_reports(&teacher, &ticket.student_code);
        view.complete_query(ticket, result).map(|_| ())
    }

    /// Ok(false) when an export is already running or no report is shown.
    pub fn export(
        &self,
        view: &mut PublicQuery,
        renderer: &dyn DocumentRenderer,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<bool> {
        let Some(job) = view.begin_export() else {
            return Ok(false);
        };
        let result = ExportLogic::export(
            format,
            renderer,
            view.teacher(),
            view.code(),
            &job.report,
            path,
            force,
        );
        view.complete_export(job, result)?;
        Ok(true)
    }
}
