// src/export/renderer.rs

use crate::errors::AppResult;
use crate::export::model::{Region, grid_table};
use crate::export::pdf::PdfManager;

/// Turns a description of the on-screen regions into a document.
pub trait DocumentRenderer {
    fn render(&self, regions: &[Region]) -> AppResult<Vec<u8>>;
}

/// Vector PDF output, one flowing document for all regions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn render(&self, regions: &[Region]) -> AppResult<Vec<u8>> {
        let mut pdf = PdfManager::new();

        for region in regions {
            match region {
                Region::TeacherInfo {
                    name,
                    specialty,
                    student_code,
                } => {
                    pdf.write_title(name);
                    if let Some(s) = specialty.as_deref().filter(|s| !s.trim().is_empty()) {
                        pdf.write_line(s);
                    }
                    pdf.write_line(&format!("Student code: {student_code}"));
                    pdf.gap(10.0);
                }
                Region::ReportGrid {
                    title,
                    report_identifier,
                    updated_at,
                    grid,
                } => {
                    pdf.write_title(title);
                    let mut meta = format!("Report: {report_identifier}");
                    if let Some(ts) = updated_at {
                        meta.push_str(&format!("  |  Updated: {}", ts.format("%Y-%m-%d %H:%M")));
                    }
                    pdf.write_line(&meta);
                    pdf.gap(4.0);

                    let (headers, rows) = grid_table(grid);
                    if rows.is_empty() {
                        pdf.write_line("(no rows)");
                    } else {
                        pdf.write_table(&headers, &rows);
                    }
                }
            }
        }

        Ok(pdf.finish())
    }
}
