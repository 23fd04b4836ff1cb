//! Error types for LaTeX table generation.

use std::path::PathBuf;

use sheet2tex_data::DataError;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// A number format pattern that cannot be parsed or applied
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Malformed pattern text
    #[error("Invalid format pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Presentation type outside the supported set
    #[error("Unsupported format type '{kind}' in '{pattern}'")]
    UnsupportedType { pattern: String, kind: char },

    /// `d` applied to a non-integer value
    #[error("Format '{pattern}' requires an integer, got {value}")]
    IntegerRequired { pattern: String, value: f64 },

    /// Precision given where the type does not take one
    #[error("Precision not allowed in format '{pattern}'")]
    PrecisionNotAllowed { pattern: String },
}

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input could not be loaded
    #[error(transparent)]
    SourceRead(#[from] DataError),

    /// A numeric cell could not be formatted
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The output file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Option values that cannot produce a table
    #[error("Invalid options: {0}")]
    Config(String),
}
