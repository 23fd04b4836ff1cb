//! # sheet2tex-latex
//!
//! Convert a spreadsheet sheet or a CSV file into a LaTeX `table*` block
//! ready to paste into a document.
//!
//! The conversion is one linear pass: load the table, infer which columns
//! are numeric, lay out equal-width columns, format the numbers, serialize
//! the rows and write the block out.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheet2tex_latex::{table_to_latex, TableOptions};
//!
//! let options = TableOptions {
//!     format_string: "{:,.2f}".to_string(),
//!     ..TableOptions::delimited()
//! };
//! table_to_latex("pivot.csv", "pivot.tex", &options)?;
//! ```

pub mod error;
pub mod layout;
pub mod markup;
pub mod number;
pub mod options;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use sheet2tex_data::{Table, TableLoader};
use tracing::{debug, info};

// Re-exports
pub use error::{ConvertError, FormatError, Result};
pub use layout::ColumnLayout;
pub use markup::{escape_latex, LatexTableBuilder};
pub use number::NumberFormat;
pub use options::TableOptions;

/// Load `path_in`, render it, and write the markup to `path_out`.
///
/// Nothing is written unless loading and formatting both succeed; an
/// existing file at `path_out` is overwritten.
pub fn table_to_latex(
    path_in: impl AsRef<Path>,
    path_out: impl AsRef<Path>,
    options: &TableOptions,
) -> Result<()> {
    let path_in = path_in.as_ref();
    let path_out = path_out.as_ref();

    let table = load_table(path_in, options)?;
    let markup = render_table(&table, options)?;
    write_output(path_out, &markup)?;

    info!(
        input = %path_in.display(),
        output = %path_out.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote LaTeX table"
    );
    Ok(())
}

/// Read the input described by `options` into a [`Table`]
pub fn load_table(path_in: impl AsRef<Path>, options: &TableOptions) -> Result<Table> {
    let load = options.load_options()?;
    Ok(TableLoader::load(path_in, &load)?)
}

/// Render a loaded table as a LaTeX block without touching the filesystem
pub fn render_table(table: &Table, options: &TableOptions) -> Result<String> {
    let format = NumberFormat::parse(&options.format_string)?;
    let layout = ColumnLayout::new(
        table.column_count(),
        options.margin,
        options.page_width,
        options.header_col,
    )?;

    let kinds = table.column_kinds();
    debug!(?kinds, width = %layout.width_label(), "column layout");

    let mut rows = markup::format_cells(table, &kinds, &format)?;
    let mut header = table
        .header()
        .filter(|_| options.header_row)
        .map(<[String]>::to_vec);

    if options.escape_special {
        let escape_all = |cells: &mut Vec<String>| {
            for cell in cells.iter_mut() {
                *cell = escape_latex(cell);
            }
        };
        header.iter_mut().for_each(escape_all);
        rows.iter_mut().for_each(escape_all);
    }

    let mut builder = LatexTableBuilder::new(
        layout,
        options.caption.as_str(),
        options.table_label.as_str(),
    );
    if let Some(labels) = &header {
        builder.header(labels);
    }

    let last = rows.len().saturating_sub(1);
    for (index, cells) in rows.iter().enumerate() {
        builder.row(cells, options.bold_final && index == last);
    }

    Ok(builder.build())
}

/// Write `markup` to `path`, removing the file again if the write fails
pub fn write_output(path: impl AsRef<Path>, markup: &str) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    if let Err(source) = writer
        .write_all(markup.as_bytes())
        .and_then(|()| writer.flush())
    {
        drop(writer);
        fs::remove_file(path).ok();
        return Err(write_error(source));
    }

    Ok(())
}
