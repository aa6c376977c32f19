use std::path::Path;

use calamine::{Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{ContabilError, Result};

/// A spreadsheet cell, detached from the workbook backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Fixed-precision amount for callers that build cells themselves.
    /// Workbooks never produce it; the normalizer stores its exact digits.
    #[cfg_attr(not(test), allow(dead_code))]
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Formula error such as `#DIV/0!`.
    Error(String),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Display text of the cell, `None` when empty. Integral floats drop
    /// their fraction so account codes read `101`, not `101.0`.
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Cell::Empty => return None,
            Cell::Text(s) if s.is_empty() => return None,
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Decimal(d) => d.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Error(e) => e.clone(),
        };
        Some(text)
    }

    /// Numeric value truncated toward zero; `None` for non-numeric cells.
    pub fn truncated_integer(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Cell::Decimal(d) => d.trunc().to_i64(),
            _ => None,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) => Cell::DateTime(value),
                None => Cell::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => parse_iso(s),
            Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(e.to_string()),
        }
    }
}

fn parse_iso(raw: &str) -> Cell {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Cell::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Cell::Date(d);
    }
    Cell::Text(raw.to_string())
}

/// Cell at `col`, or an empty cell past the end of the row.
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&EMPTY)
}

/// First worksheet of a workbook, addressed from A1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> &[Cell] {
        self.rows.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Load the first worksheet of an xls/xlsx/xlsm/xlsb/ods file.
///
/// calamine trims the used range to its first non-empty cell; the grid is
/// padded back so indices match sheet positions.
pub fn read_grid(path: &Path) -> Result<Grid> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        ContabilError::Extraction(format!("{} has no worksheets", path.display()))
    })??;

    let Some((start_row, start_col)) = range.start() else {
        return Ok(Grid::default());
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);

    let mut rows = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(Cell::from));
        rows.push(cells);
    }
    log::debug!(
        "read {} rows x {} columns from {}",
        rows.len(),
        start_col + range.width(),
        path.display()
    );
    Ok(Grid::new(rows))
}
