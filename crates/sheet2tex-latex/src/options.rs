//! Conversion options.
//!
//! Options can be built in code or loaded from a TOML file; every key is
//! optional and falls back to the defaults below.
//!
//! ```toml
//! sheet_name = "Pivot"
//! table_label = "sales"
//! margin = 2.0
//! format_string = "{:,.2f}"
//! bold_final = false
//! ```

use serde::{Deserialize, Serialize};
use sheet2tex_data::{CsvOptions, LoadOptions, SourceKind};

use crate::error::{ConvertError, Result};

/// Default caption placeholder
pub const DEFAULT_CAPTION: &str = "caption goes here";

/// Default numeric pattern: thousands-separated integers
pub const DEFAULT_FORMAT: &str = "{:,.0f}";

/// Everything that shapes one conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Sheet to read (ignored for delimited text)
    pub sheet_name: String,
    /// Emitted as `\label{tab:<table_label>}`
    pub table_label: String,
    /// Text of `\caption{...}`
    pub caption: String,
    /// Space between page edge and table, in cm
    pub margin: f64,
    /// Page width in cm (A4 by default)
    pub page_width: f64,
    /// Read a spreadsheet workbook rather than delimited text
    pub excel: bool,
    /// Field delimiter for delimited text
    pub delimiter: char,
    /// Double rule after the first column
    pub header_col: bool,
    /// First row is a header, double rule beneath it
    pub header_row: bool,
    /// Bold the last body row
    pub bold_final: bool,
    /// Pattern applied to every numeric column
    pub format_string: String,
    /// Escape LaTeX special characters in cell text
    pub escape_special: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            table_label: "table1".to_string(),
            caption: DEFAULT_CAPTION.to_string(),
            margin: 2.5,
            page_width: 21.0,
            excel: true,
            delimiter: ',',
            header_col: true,
            header_row: true,
            bold_final: true,
            format_string: DEFAULT_FORMAT.to_string(),
            escape_special: false,
        }
    }
}

impl TableOptions {
    /// Parse options from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Options for a comma separated source, everything else default
    pub fn delimited() -> Self {
        Self {
            excel: false,
            ..Default::default()
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        SourceKind::from_excel_flag(self.excel)
    }

    /// Loader settings derived from these options
    pub fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            return Err(ConvertError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }

        Ok(LoadOptions {
            kind: self.source_kind(),
            sheet_name: self.sheet_name.clone(),
            header_row: self.header_row,
            csv: CsvOptions::with_delimiter(self.delimiter as u8),
        })
    }
}
