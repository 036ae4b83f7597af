// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{report_csv, report_json};
use crate::export::model::regions_for;
use crate::export::renderer::DocumentRenderer;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::{Report, TeacherCard};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// High-level export of one queried report.
pub struct ExportLogic;

impl ExportLogic {
    /// Document bytes for `report` in `format`. PDF goes through `renderer`.
    pub fn render(
        format: ExportFormat,
        renderer: &dyn DocumentRenderer,
        teacher: &TeacherCard,
        student_code: &str,
        report: &Report,
    ) -> AppResult<Vec<u8>> {
        match format {
            ExportFormat::Pdf => renderer.render(&regions_for(teacher, student_code, report)),
            ExportFormat::Json => report_json(report),
            ExportFormat::Csv => report_csv(report),
        }
    }

    /// Render and write to `path`.
    ///
    /// An existing file is only replaced with `force` or after an
    /// interactive confirmation.
    pub fn export(
        format: ExportFormat,
        renderer: &dyn DocumentRenderer,
        teacher: &TeacherCard,
        student_code: &str,
        report: &Report,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(path, force)?;

        let bytes = Self::render(format, renderer, teacher, student_code, report)?;
        debug!(format = format.as_str(), bytes = bytes.len(), "document rendered");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)
            .map_err(|e| AppError::Export(format!("cannot write {}: {e}", path.display())))?;

        info!(report = %report.id, path = %path.display(), "export written");
        notify_export_success(&format.as_str().to_ascii_uppercase(), path);
        Ok(())
    }
}
