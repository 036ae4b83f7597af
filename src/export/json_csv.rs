// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::grid_table;
use crate::models::Report;

/// Report as pretty-printed JSON, in the backend's wire shape.
pub(crate) fn report_json(report: &Report) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// Grid as CSV: a header line with the day columns, then one line per row.
pub(crate) fn report_csv(report: &Report) -> AppResult<Vec<u8>> {
    let (headers, rows) = grid_table(&report.grid);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&headers)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    for row in &rows {
        wtr.write_record(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
