//! LaTeX table markup.
//!
//! Turns a loaded [`Table`] into a `table*` environment wrapping a ruled
//! `tabular`:
//!
//! ```text
//! \begin{table*}[ht]
//!     \caption{caption goes here}
//!     \begin{tabular}{|p{8.0cm}||p{8.0cm}|} \hline
//!     Name & Total \\ \hline \hline
//!     A & 1,000 \\ \hline
//!     \textbf{B} & \textbf{2,000} \\ \hline
//!     \end{tabular}
//!     \label{tab:table1}
//! \end{table*}
//! ```

use sheet2tex_data::{ColumnKind, Table};

use crate::error::FormatError;
use crate::layout::ColumnLayout;
use crate::number::NumberFormat;

/// Separates cells within a row
pub const CELL_SEPARATOR: &str = " & ";
/// Ends a body row
pub const ROW_END: &str = r" \\ \hline";
/// Ends the header row with a double rule
pub const HEADER_END: &str = r" \\ \hline \hline";
/// Joins the lines of the block
pub const LINE_BREAK: &str = "\n\t";

/// Stringify every body cell, applying `format` to numeric columns.
///
/// Missing values become empty strings in every column.
pub fn format_cells(
    table: &Table,
    kinds: &[ColumnKind],
    format: &NumberFormat,
) -> Result<Vec<Vec<String>>, FormatError> {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(kinds)
                .map(|(cell, kind)| match kind {
                    ColumnKind::Numeric => format.format_cell(cell),
                    ColumnKind::Textual => Ok(cell.to_string()),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

/// Escape the characters LaTeX treats specially in text mode
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Join cells into one body row; `bold` wraps each cell in `\textbf{}`
pub fn serialize_row(cells: &[String], bold: bool) -> String {
    let mut line = if bold {
        cells
            .iter()
            .map(|cell| format!(r"\textbf{{{}}}", cell))
            .collect::<Vec<_>>()
            .join(CELL_SEPARATOR)
    } else {
        cells.join(CELL_SEPARATOR)
    };
    line.push_str(ROW_END);
    line
}

/// Join header labels into the header row with its double rule
pub fn serialize_header(labels: &[String]) -> String {
    let mut line = labels.join(CELL_SEPARATOR);
    line.push_str(HEADER_END);
    line
}

/// Assembles the final markup block
#[derive(Debug, Clone)]
pub struct LatexTableBuilder {
    caption: String,
    label: String,
    layout: ColumnLayout,
    lines: Vec<String>,
}

impl LatexTableBuilder {
    pub fn new(layout: ColumnLayout, caption: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            label: label.into(),
            layout,
            lines: Vec::new(),
        }
    }

    /// Add the header row
    pub fn header(&mut self, labels: &[String]) -> &mut Self {
        self.lines.push(serialize_header(labels));
        self
    }

    /// Add one body row
    pub fn row(&mut self, cells: &[String], bold: bool) -> &mut Self {
        self.lines.push(serialize_row(cells, bold));
        self
    }

    /// Render the complete `table*` block
    pub fn build(&self) -> String {
        let begin = [
            r"\begin{table*}[ht]".to_string(),
            format!(r"\caption{{{}}}", self.caption),
            format!(r"\begin{{tabular}}{{{}}} \hline", self.layout.column_spec()),
        ]
        .join(LINE_BREAK);
        let end = format!(
            "\\end{{tabular}}{}\\label{{tab:{}}}\n\\end{{table*}}",
            LINE_BREAK, self.label
        );

        let mut parts = Vec::with_capacity(self.lines.len() + 2);
        parts.push(begin);
        parts.extend(self.lines.iter().cloned());
        parts.push(end);
        parts.join(LINE_BREAK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet2tex_data::Cell;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_serialize_row() {
        assert_eq!(serialize_row(&strings(&["A", "1,000"]), false), r"A & 1,000 \\ \hline");
    }

    #[test]
    fn test_serialize_row_bold() {
        assert_eq!(
            serialize_row(&strings(&["B", "2,000"]), true),
            r"\textbf{B} & \textbf{2,000} \\ \hline"
        );
    }

    #[test]
    fn test_bold_missing_value_is_empty_wrapper() {
        assert_eq!(serialize_row(&strings(&[""]), true), r"\textbf{} \\ \hline");
    }

    #[test]
    fn test_serialize_header() {
        assert_eq!(
            serialize_header(&strings(&["Name", "Total"])),
            r"Name & Total \\ \hline \hline"
        );
    }

    #[test]
    fn test_format_cells() {
        let table = Table::new(
            None,
            vec![
                vec![Cell::Text("A".to_string()), Cell::Int(1000), Cell::Empty],
                vec![Cell::Empty, Cell::Float(2500.4), Cell::Bool(false)],
            ],
        );
        let kinds = table.column_kinds();
        let format = NumberFormat::parse("{:,.0f}").unwrap();

        let cells = format_cells(&table, &kinds, &format).unwrap();
        assert_eq!(cells[0], vec!["A", "1,000", ""]);
        assert_eq!(cells[1], vec!["", "2,500", "False"]);
    }

    #[test]
    fn test_format_cells_textual_numbers_untouched() {
        let table = Table::new(
            None,
            vec![vec![Cell::Int(1000)], vec![Cell::Text("n/k".to_string())]],
        );
        let format = NumberFormat::parse("{:,.0f}").unwrap();

        let cells = format_cells(&table, &table.column_kinds(), &format).unwrap();
        assert_eq!(cells[0], vec!["1000"]);
    }

    #[test]
    fn test_format_cells_propagates_error() {
        let table = Table::new(None, vec![vec![Cell::Int(1)], vec![Cell::Float(1.5)]]);
        let format = NumberFormat::parse("{:d}").unwrap();

        let result = format_cells(&table, &table.column_kinds(), &format);
        assert!(matches!(result, Err(FormatError::IntegerRequired { .. })));
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("R&D"), r"R\&D");
        assert_eq!(escape_latex("50%"), r"50\%");
        assert_eq!(escape_latex("a_b #1 $2"), r"a\_b \#1 \$2");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(escape_latex("~^\\"), r"\textasciitilde{}\textasciicircum{}\textbackslash{}");
        assert_eq!(escape_latex("plain"), "plain");
    }

    #[test]
    fn test_builder() {
        let layout = ColumnLayout::new(2, 2.5, 21.0, true).unwrap();
        let mut builder = LatexTableBuilder::new(layout, "caption goes here", "table1");
        builder
            .header(&strings(&["Name", "Total"]))
            .row(&strings(&["A", "1,000"]), false)
            .row(&strings(&["B", "2,000"]), true);

        let expected = [
            r"\begin{table*}[ht]",
            r"\caption{caption goes here}",
            r"\begin{tabular}{|p{8.0cm}||p{8.0cm}|} \hline",
            r"Name & Total \\ \hline \hline",
            r"A & 1,000 \\ \hline",
            r"\textbf{B} & \textbf{2,000} \\ \hline",
            r"\end{tabular}",
            r"\label{tab:table1}",
        ]
        .join("\n\t")
            + "\n\\end{table*}";

        assert_eq!(builder.build(), expected);
    }

    #[test]
    fn test_builder_without_rows() {
        let layout = ColumnLayout::new(1, 2.5, 21.0, false).unwrap();
        let output = LatexTableBuilder::new(layout, "c", "empty").build();

        assert_eq!(
            output,
            "\\begin{table*}[ht]\n\t\\caption{c}\n\t\\begin{tabular}{|p{16.0cm}|} \\hline\n\t\\end{tabular}\n\t\\label{tab:empty}\n\\end{table*}"
        );
    }
}
