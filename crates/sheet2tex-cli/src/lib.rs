//! sheet2tex CLI - Command-line interface library
//!
//! This library provides the CLI functionality for sheet2tex:
//! - Convert: Turn one sheet or CSV file into a LaTeX table block
//! - Sheets: List the sheets of a workbook
//!
//! # Library Usage
//!
//! ```ignore
//! use sheet2tex_cli::{convert_command, ConvertArgs};
//!
//! let args = ConvertArgs::new("pivot.csv");
//! convert_command(&args)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert a CSV file, writing pivot.tex next to it
//! sheet2tex convert pivot.csv
//!
//! # Pick a sheet and a number format
//! sheet2tex convert report.xlsx --sheet Totals --format '{:,.2f}' -o table.tex
//!
//! # List the sheets of a workbook
//! sheet2tex sheets report.xlsx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, resolve_options, sheets_command};
pub use app::{run_cli, ConvertArgs, InputKind};
