//! Delimited-text data source.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::{DataError, Result};
use crate::sources::DataSource;
use crate::table::Table;

/// Name reported for the single "sheet" of a delimited file
pub const CSV_SHEET_NAME: &str = "data";

/// How a delimited file is split into fields
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Byte between fields
    pub delimiter: u8,
    /// Byte that opens and closes a quoted field
    pub quote: u8,
    /// Strip surrounding whitespace from every field
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
        }
    }
}

impl CsvOptions {
    /// Tab separated
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Semicolon separated, as spreadsheet exports write it under a decimal-comma locale
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            ..Default::default()
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }
}

/// A delimited text file, read as a single table
pub struct CsvSource {
    path: String,
    options: CsvOptions,
}

impl CsvSource {
    /// Comma separated source at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().is_file() {
            return Err(DataError::FileNotFound(path_str));
        }

        Ok(Self {
            path: path_str,
            options,
        })
    }

    /// Read every record as raw strings
    pub fn read_records(&self) -> Result<Vec<Vec<String>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .trim(if self.options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(reader);

        let mut result = Vec::new();

        for record in csv_reader.records() {
            let record = record.map_err(|e| DataError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
            result.push(record.iter().map(str::to_string).collect());
        }

        Ok(result)
    }
}

impl DataSource for CsvSource {
    fn read_table(&self, _sheet: &str, header_row: bool) -> Result<Table> {
        // Delimited files have no sheets, the sheet parameter is ignored
        let mut records = self.read_records()?.into_iter();

        // The header stays verbatim so it never affects body typing
        let header = if header_row { records.next() } else { None };
        let mut table = Table::from_fields(header, records.collect());
        let before = table.row_count();
        table.drop_empty_rows();
        debug!(
            path = %self.path,
            rows = table.row_count(),
            dropped = before - table.row_count(),
            "read delimited table"
        );

        Ok(table)
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(vec![CSV_SHEET_NAME.to_string()])
    }

    fn default_sheet(&self) -> Option<String> {
        Some(CSV_SHEET_NAME.to_string())
    }
}
