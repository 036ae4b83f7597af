//! Teacher-side report workflow:
//! pick student → choose action → name the report → edit grid → save.
//!
//! The machine never performs I/O. Network work is requested through
//! tickets (`SaveTicket`, `LoadTicket`) and its outcome handed back with the
//! matching `complete_*` call. Every ticket carries the generation of the
//! editing session that issued it; once that session has been replaced
//! (student switch, another report opened) the late answer is dropped.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Notification, NoticeSlot, Report, ReportDocument, ReportId, SaveReport, SavedReport, Student,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    SelectStudent,
    ChooseAction { student: Student },
    PromptIdentifier { student: Student },
    EditReport(EditSession),
    /// Control handed to the report list view for this student.
    ManageReports { student: Student },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::SelectStudent => "select-student",
            Stage::ChooseAction { .. } => "choose-action",
            Stage::PromptIdentifier { .. } => "prompt-identifier",
            Stage::EditReport(_) => "edit-report",
            Stage::ManageReports { .. } => "manage-reports",
        }
    }

    pub fn student(&self) -> Option<&Student> {
        match self {
            Stage::SelectStudent => None,
            Stage::ChooseAction { student }
            | Stage::PromptIdentifier { student }
            | Stage::ManageReports { student } => Some(student),
            Stage::EditReport(s) => Some(&s.student),
        }
    }
}

/// What the editing area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorContent {
    /// Waiting for the full report to arrive.
    Loading {
        persisted_id: ReportId,
        report_identifier: String,
    },
    Ready(ReportDocument),
    /// The report could not be loaded; the area stays blank until the user
    /// navigates elsewhere.
    Unavailable {
        persisted_id: ReportId,
        report_identifier: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub student: Student,
    pub content: EditorContent,
    dirty: bool,
    saving: bool,
    /// Bumped by every mutation; lets a save tell whether edits happened
    /// while it was in flight.
    revision: u64,
}

impl EditSession {
    fn new(student: Student, content: EditorContent) -> Self {
        Self {
            student,
            content,
            dirty: false,
            saving: false,
            revision: 0,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn document(&self) -> Option<&ReportDocument> {
        match &self.content {
            EditorContent::Ready(doc) => Some(doc),
            _ => None,
        }
    }
}

/// Everything the report list hands over when "edit" is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct EditHandoff {
    pub student: Student,
    pub persisted_id: ReportId,
    pub report_identifier: String,
    /// Full report when the caller already has it; fetched otherwise.
    pub report: Option<Report>,
}

#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    pub persisted_id: ReportId,
}

#[derive(Debug)]
pub struct SaveTicket {
    generation: u64,
    revision: u64,
    pub request: SaveReport,
}

#[derive(Debug)]
pub struct ReportWorkflow {
    stage: Stage,
    notice: NoticeSlot,
    title_prefix: String,
    generation: u64,
}

impl ReportWorkflow {
    pub fn new(title_prefix: &str, notification_ttl: Duration) -> Self {
        Self {
            stage: Stage::SelectStudent,
            notice: NoticeSlot::new(notification_ttl),
            title_prefix: title_prefix.to_string(),
            generation: 0,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.report_title_prefix, cfg.notification_ttl())
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn student(&self) -> Option<&Student> {
        self.stage.student()
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.stage {
            Stage::EditReport(s) => Some(s),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&ReportDocument> {
        self.session().and_then(EditSession::document)
    }

    pub fn is_dirty(&self) -> bool {
        self.session().is_some_and(EditSession::is_dirty)
    }

    /// Current notification, cleared once older than the configured delay.
    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        self.notice.active(now)
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notice.peek()
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = self.stage.name(), to = stage.name(), "workflow transition");
        self.stage = stage;
    }

    /// Replaces the editing session: late answers for the old one are ignored.
    fn next_generation(&mut self) {
        self.generation += 1;
    }

    // ---------------------------
    // Selection and actions
    // ---------------------------

    /// Works from every stage. Any unsaved draft is discarded without asking.
    pub fn select_student(&mut self, student: Option<Student>) {
        if self.is_dirty() {
            info!("student switched, discarding unsaved report changes");
        }
        self.next_generation();
        self.notice.clear();
        match student {
            Some(student) => self.enter(Stage::ChooseAction { student }),
            None => self.enter(Stage::SelectStudent),
        }
    }

    pub fn choose_create(&mut self) -> AppResult<()> {
        match &self.stage {
            Stage::ChooseAction { student } => {
                let student = student.clone();
                self.enter(Stage::PromptIdentifier { student });
                Ok(())
            }
            other => Err(not_here("create a report", other)),
        }
    }

    /// Hands the selected student over to the report list view.
    pub fn choose_manage(&mut self) -> AppResult<Student> {
        match &self.stage {
            Stage::ChooseAction { student } => {
                let student = student.clone();
                self.enter(Stage::ManageReports {
                    student: student.clone(),
                });
                Ok(student)
            }
            other => Err(not_here("manage reports", other)),
        }
    }

    /// Back to the action choice from the prompt, the list view or the editor.
    pub fn back_to_actions(&mut self) -> AppResult<()> {
        let student = match &self.stage {
            Stage::PromptIdentifier { student } | Stage::ManageReports { student } => {
                student.clone()
            }
            Stage::EditReport(s) => s.student.clone(),
            other => return Err(not_here("go back", other)),
        };
        self.next_generation();
        self.enter(Stage::ChooseAction { student });
        Ok(())
    }

    pub fn cancel_identifier(&mut self) -> AppResult<()> {
        match &self.stage {
            Stage::PromptIdentifier { .. } => self.back_to_actions(),
            other => Err(not_here("cancel", other)),
        }
    }

    /// Seeds an unsaved draft named `identifier` and opens the editor.
    pub fn submit_identifier(&mut self, identifier: &str) -> AppResult<()> {
        let student = match &self.stage {
            Stage::PromptIdentifier { student } => student.clone(),
            other => return Err(not_here("name a report", other)),
        };

        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AppError::validation("report identifier required"));
        }

        self.next_generation();
        let draft = ReportDocument::draft(identifier, &self.title_prefix);
        self.enter(Stage::EditReport(EditSession::new(
            student,
            EditorContent::Ready(draft),
        )));
        Ok(())
    }

    /// Enters the editor for an existing report, clean.
    ///
    /// Returns a ticket when the full report still has to be fetched.
    pub fn open_existing(&mut self, handoff: EditHandoff) -> Option<LoadTicket> {
        self.next_generation();
        self.notice.clear();

        let EditHandoff {
            student,
            persisted_id,
            report_identifier,
            report,
        } = handoff;

        match report {
            Some(r) if r.id == persisted_id => {
                self.enter(Stage::EditReport(EditSession::new(
                    student,
                    EditorContent::Ready(r.into()),
                )));
                None
            }
            _ => {
                self.enter(Stage::EditReport(EditSession::new(
                    student,
                    EditorContent::Loading {
                        persisted_id: persisted_id.clone(),
                        report_identifier,
                    },
                )));
                Some(LoadTicket {
                    generation: self.generation,
                    persisted_id,
                })
            }
        }
    }

    /// Ok(false) when the ticket belongs to a replaced session.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: AppResult<Report>,
    ) -> AppResult<bool> {
        if ticket.generation != self.generation {
            debug!(report = %ticket.persisted_id, "dropping stale report load");
            return Ok(false);
        }
        let Stage::EditReport(session) = &mut self.stage else {
            return Ok(false);
        };
        let EditorContent::Loading {
            persisted_id,
            report_identifier,
        } = &session.content
        else {
            return Ok(false);
        };

        match result {
            Ok(report) => {
                session.content = EditorContent::Ready(report.into());
                session.dirty = false;
                Ok(true)
            }
            Err(e) => {
                warn!(report = %persisted_id, "report load failed: {e}");
                session.content = EditorContent::Unavailable {
                    persisted_id: persisted_id.clone(),
                    report_identifier: report_identifier.clone(),
                };
                session.dirty = false;
                self.notice
                    .set(Notification::error(e.user_message("Failed to load the report")));
                Err(e)
            }
        }
    }

    // ---------------------------
    // Editing
    // ---------------------------

    fn edit<F>(&mut self, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut ReportDocument) -> AppResult<()>,
    {
        let Stage::EditReport(session) = &mut self.stage else {
            return Err(not_here("edit", &self.stage));
        };
        let EditorContent::Ready(doc) = &mut session.content else {
            return Err(AppError::validation("no report is open for editing"));
        };

        f(doc)?;
        session.dirty = true;
        session.revision += 1;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> AppResult<()> {
        self.edit(|doc| {
            doc.title = title.to_string();
            Ok(())
        })
    }

    pub fn add_row(&mut self, label: &str) -> AppResult<()> {
        self.edit(|doc| {
            doc.grid = doc.grid.add_row(label)?;
            Ok(())
        })
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) -> AppResult<()> {
        self.edit(|doc| {
            doc.grid = doc.grid.set_cell(row, col, value)?;
            Ok(())
        })
    }

    pub fn remove_row(&mut self, row: usize) -> AppResult<()> {
        self.edit(|doc| {
            doc.grid = doc.grid.remove_row(row)?;
            Ok(())
        })
    }

    pub fn rename_row(&mut self, row: usize, label: &str) -> AppResult<()> {
        self.edit(|doc| {
            doc.grid = doc.grid.rename_row(row, label)?;
            Ok(())
        })
    }

    // ---------------------------
    // Saving
    // ---------------------------

    /// Dirty, identifier set, and no save already running.
    pub fn can_save(&self) -> bool {
        self.session().is_some_and(|s| {
            s.dirty
                && !s.saving
                && s
                    .document()
                    .is_some_and(|d| !d.report_identifier.trim().is_empty())
        })
    }

    /// `Ok(None)` while saving is disabled. A document without rows or with a
    /// blank title fails locally and no request is issued.
    pub fn begin_save(&mut self) -> AppResult<Option<SaveTicket>> {
        if !self.can_save() {
            return Ok(None);
        }
        let generation = self.generation;
        let Stage::EditReport(session) = &mut self.stage else {
            return Ok(None);
        };
        let Some(doc) = session.document() else {
            return Ok(None);
        };

        let problem = if doc.grid.is_empty() {
            Some("add at least one row before saving")
        } else if doc.title.trim().is_empty() {
            Some("report title required")
        } else {
            None
        };
        if let Some(msg) = problem {
            self.notice.set(Notification::warning(msg));
            return Err(AppError::validation(msg));
        }

        let request = SaveReport {
            report_id: doc.persisted_id.clone(),
            student_id: session.student.id.clone(),
            report_identifier: doc.report_identifier.clone(),
            title: doc.title.clone(),
            grid: doc.grid.clone(),
        };
        session.saving = true;
        debug!(
            report = ?request.report_id,
            identifier = %request.report_identifier,
            "save started"
        );

        Ok(Some(SaveTicket {
            generation,
            revision: session.revision,
            request,
        }))
    }

    /// Ok(true) once applied, Ok(false) for a ticket of a replaced session.
    /// A failed save keeps the document dirty and returns the error.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: AppResult<SavedReport>,
    ) -> AppResult<bool> {
        if ticket.generation != self.generation {
            debug!("dropping stale save result");
            return Ok(false);
        }
        let Stage::EditReport(session) = &mut self.stage else {
            return Ok(false);
        };
        session.saving = false;
        let EditorContent::Ready(doc) = &mut session.content else {
            return Ok(false);
        };

        match result {
            Ok(saved) => {
                info!(report = %saved.id, "report saved");
                doc.persisted_id = Some(saved.id);
                if let Some(identifier) = saved
                    .report_identifier
                    .filter(|i| !i.trim().is_empty())
                {
                    doc.report_identifier = identifier;
                }
                // edits made while the request was out are still unsaved
                session.dirty = session.revision != ticket.revision;
                self.notice.set(Notification::success("Report saved"));
                Ok(true)
            }
            Err(e) => {
                warn!("report save failed: {e}");
                self.notice
                    .set(Notification::error(e.user_message("Failed to save the report")));
                Err(e)
            }
        }
    }
}

fn not_here(action: &str, stage: &Stage) -> AppError {
    AppError::validation(format!("cannot {action} at stage '{}'", stage.name()))
}
