//! Spreadsheet data source using calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::sources::DataSource;
use crate::table::{Cell, Table};

/// Largest float that still converts losslessly to `i64`
const I64_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Excel (or ODS) workbook data source
pub struct ExcelSource {
    /// Path to the workbook
    path: String,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook and cache its sheet names
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().is_file() {
            return Err(DataError::FileNotFound(path_str));
        }

        let workbook = open_workbook_auto(path.as_ref())
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", path_str, e)))?;

        let sheet_names = workbook.sheet_names();

        Ok(Self {
            path: path_str,
            sheet_names,
        })
    }

    /// Convert a calamine cell to a typed cell.
    ///
    /// Integral floats become integers, the way the workbook shows them.
    fn to_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) if s.is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => {
                if f.fract() == 0.0 && f.abs() < I64_LIMIT {
                    Cell::Int(*f as i64)
                } else {
                    Cell::Float(*f)
                }
            }
            Data::Bool(b) => Cell::Bool(*b),
            Data::Error(_) | Data::DateTime(_) => Cell::Text(data.to_string()),
            Data::DateTimeIso(s) => Cell::Text(s.clone()),
            Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

impl DataSource for ExcelSource {
    fn read_table(&self, sheet: &str, header_row: bool) -> Result<Table> {
        if !self.sheet_names.iter().any(|name| name == sheet) {
            return Err(DataError::SheetNotFound {
                name: sheet.to_string(),
                available: self.sheet_names.clone(),
            });
        }

        // Re-open workbook for reading (calamine requires this pattern)
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", self.path, e)))?;

        let range = workbook.worksheet_range(sheet)?;
        let mut rows = range.rows();

        // The header is stringified on its own so it never affects body typing
        let header: Option<Vec<String>> = if header_row {
            rows.next()
                .map(|row| row.iter().map(|data| Self::to_cell(data).to_string()).collect())
        } else {
            None
        };
        let body: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(Self::to_cell).collect())
            .collect();

        debug!(path = %self.path, sheet, rows = body.len(), "read worksheet");

        Ok(Table::new(header, body))
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheet_names.clone())
    }

    fn default_sheet(&self) -> Option<String> {
        self.sheet_names.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell() {
        assert_eq!(ExcelSource::to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(ExcelSource::to_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(
            ExcelSource::to_cell(&Data::String("hello".to_string())),
            Cell::Text("hello".to_string())
        );
        assert_eq!(ExcelSource::to_cell(&Data::Int(42)), Cell::Int(42));
        assert_eq!(ExcelSource::to_cell(&Data::Bool(true)), Cell::Bool(true));
    }

    #[test]
    fn test_integral_float_becomes_int() {
        assert_eq!(ExcelSource::to_cell(&Data::Float(10.0)), Cell::Int(10));
        assert_eq!(ExcelSource::to_cell(&Data::Float(-3.0)), Cell::Int(-3));
        assert_eq!(ExcelSource::to_cell(&Data::Float(2.75)), Cell::Float(2.75));
        assert_eq!(ExcelSource::to_cell(&Data::Float(1e300)), Cell::Float(1e300));
    }

    #[test]
    fn test_new_file_not_found() {
        let result = ExcelSource::new("/nonexistent/path/file.xlsx");
        assert!(matches!(result, Err(DataError::FileNotFound(_))));
    }
}
