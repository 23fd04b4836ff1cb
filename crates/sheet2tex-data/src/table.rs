//! In-memory table model: typed cells, an optional header, and column
//! type inference.

use std::fmt;

/// Field contents read as a missing value in delimited text
const MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "#N/A", "#NA", "<NA>", "NULL", "null",
    "None",
];

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Parse a delimited-text field into a typed cell.
    ///
    /// Empty (or whitespace-only) fields and the usual NA markers are
    /// missing values. Anything that parses as an integer or a float becomes
    /// numeric; the rest is text.
    pub fn parse(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() || MISSING_MARKERS.contains(&field) {
            return Cell::Empty;
        }
        if let Ok(i) = field.parse::<i64>() {
            return Cell::Int(i);
        }
        if let Ok(f) = field.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(field.to_string())
    }

    /// Keep a delimited-text field as text; only missing markers are
    /// recognised
    pub fn parse_text(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() || MISSING_MARKERS.contains(&field) {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    /// Whether this is a missing value
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Whether this cell holds a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => f.write_str(&float_to_string(*x)),
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip form, always carrying a fractional part
/// (`1000.0`, `2.5`, `nan`, `inf`). Magnitudes from 1e16 up and below
/// 1e-4 switch to scientific notation (`1e+20`, `1.5e-05`).
fn float_to_string(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let raw = format!("{:e}", x);
        let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }
    let s = x.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Classification of a column, computed once after load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-missing body value is a number
    Numeric,
    Textual,
}

/// A loaded table: optional header row plus typed body rows.
///
/// Every row has exactly [`Table::column_count`] cells; the fields are
/// private so that only the padding constructors build one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, padding short rows (and the header) to the widest row
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(header.as_ref().map(Vec::len))
            .max()
            .unwrap_or(0);

        let header = header.map(|mut h| {
            h.resize(width, String::new());
            h
        });
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self { header, rows }
    }

    /// Build a table from raw delimited-text fields.
    ///
    /// Typing is decided per column: a column whose non-missing fields all
    /// parse as numbers gets numeric cells, any other column keeps its
    /// fields as written (`007` stays `007`).
    pub fn from_fields(header: Option<Vec<String>>, mut fields: Vec<Vec<String>>) -> Self {
        let width = fields.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut fields {
            row.resize(width, String::new());
        }

        let numeric: Vec<bool> = (0..width)
            .map(|col| {
                fields
                    .iter()
                    .map(|row| Cell::parse(&row[col]))
                    .all(|cell| cell.is_empty() || cell.is_numeric())
            })
            .collect();

        let rows = fields
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&numeric)
                    .map(|(field, &numeric)| {
                        if numeric {
                            Cell::parse(field)
                        } else {
                            Cell::parse_text(field)
                        }
                    })
                    .collect()
            })
            .collect();

        Self::new(header, rows)
    }

    /// Header labels, when the first row was split off as a header
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Body rows, all of [`Table::column_count`] cells
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .first()
            .map(Vec::len)
            .or_else(|| self.header.as_ref().map(Vec::len))
            .unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Remove body rows in which every cell is missing
    pub fn drop_empty_rows(&mut self) {
        self.rows.retain(|row| !row.iter().all(Cell::is_empty));
    }

    /// Infer the kind of every column from the body rows.
    ///
    /// A column is numeric when it has at least one value and all of its
    /// non-missing values are numbers. The header never takes part.
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.column_count())
            .map(|col| {
                let mut values = self
                    .rows
                    .iter()
                    .map(|row| &row[col])
                    .filter(|cell| !cell.is_empty())
                    .peekable();

                if values.peek().is_some() && values.all(Cell::is_numeric) {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Textual
                }
            })
            .collect()
    }
}
