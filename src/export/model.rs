// src/export/model.rs

use crate::models::{Grid, Report, TeacherCard};
use chrono::{DateTime, Utc};

/// An on-screen block handed to a document renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    TeacherInfo {
        name: String,
        specialty: Option<String>,
        student_code: String,
    },
    ReportGrid {
        title: String,
        report_identifier: String,
        updated_at: Option<DateTime<Utc>>,
        grid: Grid,
    },
}

/// Teacher block followed by the report grid, the layout of the query view.
pub fn regions_for(teacher: &TeacherCard, student_code: &str, report: &Report) -> Vec<Region> {
    vec![
        Region::TeacherInfo {
            name: teacher.name.clone(),
            specialty: teacher.specialty.clone(),
            student_code: student_code.to_string(),
        },
        Region::ReportGrid {
            title: report.title.clone(),
            report_identifier: report.report_identifier.clone(),
            updated_at: report.updated_at,
            grid: report.grid.clone(),
        },
    ]
}

/// Header row and body rows of a grid, row label first (for CSV / PDF).
pub fn grid_table(grid: &Grid) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers = vec![String::new()];
    headers.extend(grid.columns().iter().cloned());

    let rows = grid
        .rows()
        .iter()
        .map(|r| {
            let mut line = Vec::with_capacity(r.cells.len() + 1);
            line.push(r.label.clone());
            line.extend(r.cells.iter().cloned());
            line
        })
        .collect();

    (headers, rows)
}
