//! Data source implementations.
//!
//! This module contains adapters for spreadsheet workbooks and delimited text.

pub mod csv;
pub mod excel;

use std::path::Path;

pub use csv::{CsvOptions, CsvSource};
pub use excel::ExcelSource;

use crate::error::Result;
use crate::table::Table;

/// Trait for data sources that can provide one table per sheet
pub trait DataSource {
    /// Read a whole sheet into a [`Table`]
    ///
    /// # Arguments
    /// * `sheet` - Sheet name (ignored by single-table sources like CSV)
    /// * `header_row` - Split the first row off as the header
    fn read_table(&self, sheet: &str, header_row: bool) -> Result<Table>;

    /// List available sheets/tables in the source
    fn list_sheets(&self) -> Result<Vec<String>>;

    /// Get the default sheet name
    fn default_sheet(&self) -> Option<String>;
}

/// Which ingestion path a source file takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Spreadsheet workbook, read through calamine
    Excel,
    /// Delimited text, read through the csv crate
    Delimited,
}

impl SourceKind {
    /// Guess the kind from the file extension; unknown extensions are
    /// treated as delimited text
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => SourceKind::Excel,
            _ => SourceKind::Delimited,
        }
    }

    pub fn from_excel_flag(excel: bool) -> Self {
        if excel {
            SourceKind::Excel
        } else {
            SourceKind::Delimited
        }
    }
}
