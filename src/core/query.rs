//! Parent-facing lookup: one teacher, a student code, that student's reports.

use crate::errors::{AppError, AppResult};
use crate::models::{Notification, NoticeSlot, Report, ReportId, TeacherCard, latest_first};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Idle,
    Loading,
    /// The code matched no report. Not an error.
    NoMatch,
    Found {
        /// Most recently updated first.
        reports: Vec<Report>,
        selected: usize,
    },
    Failed(String),
}

#[derive(Debug)]
pub struct QueryTicket {
    generation: u64,
    pub student_code: String,
}

/// The report being exported, as it was when the export started.
#[derive(Debug)]
pub struct ExportJob {
    generation: u64,
    pub report: Report,
}

#[derive(Debug)]
pub struct PublicQuery {
    teacher: TeacherCard,
    code: String,
    outcome: QueryOutcome,
    exporting: bool,
    notice: NoticeSlot,
    generation: u64,
}

impl PublicQuery {
    pub fn new(teacher: TeacherCard, notification_ttl: Duration) -> Self {
        Self {
            teacher,
            code: String::new(),
            outcome: QueryOutcome::Idle,
            exporting: false,
            notice: NoticeSlot::new(notification_ttl),
            generation: 0,
        }
    }

    pub fn teacher(&self) -> &TeacherCard {
        &self.teacher
    }

    /// Code of the last submitted query.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        self.notice.active(now)
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notice.peek()
    }

    pub fn reports(&self) -> &[Report] {
        match &self.outcome {
            QueryOutcome::Found { reports, .. } => reports,
            _ => &[],
        }
    }

    /// Report currently rendered.
    pub fn selected(&self) -> Option<&Report> {
        match &self.outcome {
            QueryOutcome::Found { reports, selected } => reports.get(*selected),
            _ => None,
        }
    }

    pub fn begin_query(&mut self, code: &str) -> AppResult<QueryTicket> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("student code required"));
        }

        self.generation += 1;
        self.code = code.to_string();
        self.outcome = QueryOutcome::Loading;
        self.notice.clear();
        debug!(teacher = %self.teacher.id, code, "query started");

        Ok(QueryTicket {
            generation: self.generation,
            student_code: self.code.clone(),
        })
    }

    /// Ok(false) when a newer query has been started since.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        result: AppResult<Vec<Report>>,
    ) -> AppResult<bool> {
        if ticket.generation != self.generation {
            debug!(code = %ticket.student_code, "dropping stale query result");
            return Ok(false);
        }

        match result {
            Ok(reports) if reports.is_empty() => {
                info!(code = %ticket.student_code, "no report matches the code");
                self.outcome = QueryOutcome::NoMatch;
                Ok(true)
            }
            Ok(mut reports) => {
                latest_first(&mut reports);
                self.outcome = QueryOutcome::Found {
                    reports,
                    selected: 0,
                };
                Ok(true)
            }
            Err(e) => {
                warn!(code = %ticket.student_code, "query failed: {e}");
                let msg = e.user_message("Failed to query reports");
                self.outcome = QueryOutcome::Failed(msg.clone());
                self.notice.set(Notification::error(msg));
                Err(e)
            }
        }
    }

    /// Switches the rendered report.
    pub fn select(&mut self, id: &ReportId) -> AppResult<()> {
        self.select_where(|r| &r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("report {id} is not in the results")))
    }

    pub fn select_by_identifier(&mut self, identifier: &str) -> AppResult<()> {
        let wanted = identifier.trim();
        self.select_where(|r| r.report_identifier.trim() == wanted)
            .ok_or_else(|| AppError::NotFound(format!("no report named '{wanted}'")))
    }

    fn select_where<F>(&mut self, pred: F) -> Option<()>
    where
        F: Fn(&Report) -> bool,
    {
        let QueryOutcome::Found { reports, selected } = &mut self.outcome else {
            return None;
        };
        *selected = reports.iter().position(pred)?;
        Some(())
    }

    /// None while an export runs or nothing is rendered.
    pub fn begin_export(&mut self) -> Option<ExportJob> {
        if self.exporting {
            return None;
        }
        let report = self.selected()?.clone();
        self.exporting = true;
        Some(ExportJob {
            generation: self.generation,
            report,
        })
    }

    /// Reports how the export went; the rendered results are left alone.
    pub fn complete_export(&mut self, job: ExportJob, result: AppResult<()>) -> AppResult<()> {
        self.exporting = false;
        if job.generation != self.generation {
            debug!(report = %job.report.id, "export finished after a new query");
        }

        match result {
            Ok(()) => {
                self.notice.set(Notification::success("Report exported"));
                Ok(())
            }
            Err(e) => {
                warn!(report = %job.report.id, "export failed: {e}");
                self.notice
                    .set(Notification::error(e.user_message("Failed to export the report")));
                Err(e)
            }
        }
    }
}
