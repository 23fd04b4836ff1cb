//! # sheet2tex-data
//!
//! Table loading for sheet2tex - read one sheet of an Excel workbook or a
//! delimited text file into a typed [`Table`].
//!
//! ## Features
//!
//! - **Excel Support**: Read `.xlsx`/`.xls`/`.ods` sheets using `calamine`
//! - **CSV Support**: Comma, semicolon or tab separated files using `csv`
//! - **Column Inference**: Classify each column as numeric or textual once
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheet2tex_data::{LoadOptions, TableLoader};
//!
//! let table = TableLoader::load("pivot.csv", &LoadOptions::delimited())?;
//! let kinds = table.column_kinds();
//! ```

pub mod error;
pub mod sources;
pub mod table;

use std::path::Path;

use tracing::debug;

// Re-exports
pub use error::{DataError, Result};
pub use sources::{CsvOptions, CsvSource, DataSource, ExcelSource, SourceKind};
pub use table::{Cell, ColumnKind, Table};

/// What to read and how
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub kind: SourceKind,
    /// Sheet to read from a workbook
    pub sheet_name: String,
    /// Split the first row off as the header
    pub header_row: bool,
    pub csv: CsvOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            kind: SourceKind::Excel,
            sheet_name: "Sheet1".to_string(),
            header_row: true,
            csv: CsvOptions::default(),
        }
    }
}

impl LoadOptions {
    /// Defaults for a comma separated file with a header row
    pub fn delimited() -> Self {
        Self {
            kind: SourceKind::Delimited,
            ..Default::default()
        }
    }
}

/// Loads a single table from a file
pub struct TableLoader;

impl TableLoader {
    /// Read the configured sheet of `path` into a [`Table`]
    ///
    /// Fails if the file is missing, the sheet does not exist, the content
    /// is not tabular, or the result has no columns.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Table> {
        let path = path.as_ref();
        debug!(path = %path.display(), kind = ?options.kind, "loading table");

        let source: Box<dyn DataSource> = match options.kind {
            SourceKind::Excel => Box::new(ExcelSource::new(path)?),
            SourceKind::Delimited => {
                Box::new(CsvSource::with_options(path, options.csv.clone())?)
            }
        };

        let table = source.read_table(&options.sheet_name, options.header_row)?;
        if table.column_count() == 0 {
            return Err(DataError::EmptyTable(path.display().to_string()));
        }

        Ok(table)
    }

    /// List the sheets of a workbook (a delimited file has exactly one)
    pub fn list_sheets(path: impl AsRef<Path>, kind: SourceKind) -> Result<Vec<String>> {
        match kind {
            SourceKind::Excel => ExcelSource::new(path)?.list_sheets(),
            SourceKind::Delimited => CsvSource::new(path)?.list_sheets(),
        }
    }
}
