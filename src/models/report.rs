use super::grid::Grid;
use super::id::{ReportId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted report as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    /// Absent from public query rows.
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub report_identifier: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "data_json", default)]
    pub grid: Grid,
}

/// Answer of the save call. Only `id` is guaranteed; `report_identifier`
/// is the server's normalized form when it sends one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedReport {
    pub id: ReportId,
    #[serde(default)]
    pub report_identifier: Option<String>,
}

impl From<&Report> for SavedReport {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id.clone(),
            report_identifier: Some(r.report_identifier.clone()),
        }
    }
}

/// Row of the "list a student's reports" endpoint; no grid attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: ReportId,
    pub report_identifier: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Report> for ReportSummary {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id.clone(),
            report_identifier: r.report_identifier.clone(),
            title: r.title.clone(),
            updated_at: r.updated_at,
        }
    }
}

/// Body of the save call. `report_id == None` creates a new report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub report_id: Option<ReportId>,
    pub student_id: StudentId,
    pub report_identifier: String,
    pub title: String,
    #[serde(rename = "data_json")]
    pub grid: Grid,
}

/// Report being edited on the client: a draft until `persisted_id` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub persisted_id: Option<ReportId>,
    pub report_identifier: String,
    pub title: String,
    pub grid: Grid,
}

impl ReportDocument {
    /// Fresh draft with an empty weekday grid.
    pub fn draft(report_identifier: &str, title_prefix: &str) -> Self {
        Self {
            persisted_id: None,
            report_identifier: report_identifier.to_string(),
            title: format!("{title_prefix}{report_identifier}"),
            grid: Grid::empty(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.persisted_id.is_none()
    }
}

impl From<Report> for ReportDocument {
    fn from(r: Report) -> Self {
        Self {
            persisted_id: Some(r.id),
            report_identifier: r.report_identifier,
            title: r.title,
            grid: r.grid,
        }
    }
}

/// Most recently updated report first; undated reports sort last.
pub fn latest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
