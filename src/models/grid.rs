//! Tabular payload of a report.
//!
//! Every edit is a pure function returning a new `Grid`; the input is never
//! touched, so the editor can keep the previous value around.
//! Invariant: each row holds exactly `columns.len()` cells.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Canonical weekday columns, Saturday first.
pub const WEEKDAYS: [&str; 7] = [
    "Saturday",
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    #[serde(rename = "rowName")]
    pub label: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireGrid")]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<GridRow>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Free-function spelling of [`Grid::empty`].
pub fn create_empty_grid() -> Grid {
    Grid::empty()
}

impl Grid {
    /// The seven weekday columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .map(String::as_str)
    }

    pub fn add_row(&self, label: &str) -> AppResult<Grid> {
        if label.trim().is_empty() {
            return Err(AppError::validation("row name required"));
        }

        let mut next = self.clone();
        next.rows.push(GridRow {
            label: label.to_string(),
            cells: vec![String::new(); self.columns.len()],
        });
        Ok(next)
    }

    pub fn set_cell(&self, row: usize, col: usize, value: &str) -> AppResult<Grid> {
        self.check_row(row)?;
        if col >= self.columns.len() {
            return Err(AppError::Index {
                what: "column",
                index: col,
                len: self.columns.len(),
            });
        }

        let mut next = self.clone();
        next.rows[row].cells[col] = value.to_string();
        Ok(next)
    }

    pub fn remove_row(&self, row: usize) -> AppResult<Grid> {
        self.check_row(row)?;

        let mut next = self.clone();
        next.rows.remove(row);
        Ok(next)
    }

    /// Any label is accepted here, including an empty one.
    pub fn rename_row(&self, row: usize, label: &str) -> AppResult<Grid> {
        self.check_row(row)?;

        let mut next = self.clone();
        next.rows[row].label = label.to_string();
        Ok(next)
    }

    fn check_row(&self, row: usize) -> AppResult<()> {
        if row >= self.rows.len() {
            return Err(AppError::Index {
                what: "row",
                index: row,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}

// ---------------------------
// Wire decoding
// ---------------------------

#[derive(Deserialize)]
struct WireRow {
    #[serde(rename = "rowName", default)]
    label: String,
    #[serde(default)]
    cells: Vec<Option<String>>,
}

#[derive(Deserialize)]
struct WireGrid {
    #[serde(default = "default_columns")]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<WireRow>,
}

fn default_columns() -> Vec<String> {
    WEEKDAYS.iter().map(|d| d.to_string()).collect()
}

impl TryFrom<WireGrid> for Grid {
    type Error = String;

    /// `null` cells become empty strings and short rows are padded; a row
    /// wider than the column list cannot be repaired and is rejected.
    fn try_from(wire: WireGrid) -> Result<Self, Self::Error> {
        let width = wire.columns.len();
        let mut rows = Vec::with_capacity(wire.rows.len());

        for (i, r) in wire.rows.into_iter().enumerate() {
            if r.cells.len() > width {
                return Err(format!(
                    "row {} ('{}') has {} cells but the grid has {} columns",
                    i,
                    r.label,
                    r.cells.len(),
                    width
                ));
            }
            let mut cells: Vec<String> = r
                .cells
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            cells.resize(width, String::new());
            rows.push(GridRow {
                label: r.label,
                cells,
            });
        }

        Ok(Grid {
            columns: wire.columns,
            rows,
        })
    }
}

