//! Column layout: equal-width `p{}` columns filling the text width.

use crate::error::{ConvertError, Result};

/// Equal-width column layout for a `tabular` environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub column_count: usize,
    /// Width of each column in cm
    pub width: f64,
    /// Double rule after the first column
    pub header_col: bool,
}

impl ColumnLayout {
    /// Split `page_width - 2 * margin` evenly across `column_count` columns
    pub fn new(column_count: usize, margin: f64, page_width: f64, header_col: bool) -> Result<Self> {
        if column_count == 0 {
            return Err(ConvertError::Config("table has no columns".to_string()));
        }

        let usable = page_width - 2.0 * margin;
        if !usable.is_finite() || usable <= 0.0 {
            return Err(ConvertError::Config(format!(
                "page width {} leaves no room inside margins of {}",
                page_width, margin
            )));
        }

        Ok(Self {
            column_count,
            width: usable / column_count as f64,
            header_col,
        })
    }

    /// Width as written into the markup, e.g. `8.0cm`
    pub fn width_label(&self) -> String {
        format!("{:.1}cm", self.width)
    }

    /// Column specification, e.g. `|p{8.0cm}||p{8.0cm}|`
    pub fn column_spec(&self) -> String {
        let cell = format!("p{{{}}}", self.width_label());
        let mut spec = String::from("|");

        for col in 0..self.column_count {
            spec.push_str(&cell);
            spec.push_str(if col == 0 && self.header_col { "||" } else { "|" });
        }

        spec
    }
}
