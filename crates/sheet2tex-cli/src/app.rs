//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use sheet2tex_data::{SourceKind, TableLoader};
use sheet2tex_latex::{load_table, render_table, table_to_latex, TableOptions};

/// How to read the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// Decide from the file extension
    Auto,
    /// Spreadsheet workbook (xlsx, xls, ods)
    Excel,
    /// Delimited text
    Csv,
}

#[derive(Parser)]
#[command(name = "sheet2tex")]
#[command(author, version, about = "Spreadsheet and CSV tables to LaTeX", long_about = None)]
struct Cli {
    /// Log each conversion step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one sheet or CSV file into a LaTeX table
    Convert(ConvertArgs),

    /// List the sheets of a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

/// Arguments of the convert command; unset values fall back to the
/// config file, then to the built-in defaults
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Input spreadsheet or delimited text file
    pub input: PathBuf,

    /// Output file (defaults to the input with a .tex extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the table to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// TOML file with conversion options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input kind (defaults to the config file, else the extension)
    #[arg(short, long, value_enum)]
    pub kind: Option<InputKind>,

    /// Sheet to read from a workbook
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Cross-reference label, emitted as \label{tab:LABEL}
    #[arg(short, long)]
    pub label: Option<String>,

    /// Caption text
    #[arg(long)]
    pub caption: Option<String>,

    /// Margin between page edge and table, in cm
    #[arg(long)]
    pub margin: Option<f64>,

    /// Page width in cm
    #[arg(long)]
    pub page_width: Option<f64>,

    /// Field delimiter for delimited text (a single character or "tab")
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Numeric format pattern, e.g. '{:,.2f}'
    #[arg(short, long)]
    pub format: Option<String>,

    /// Single rule after the first column
    #[arg(long)]
    pub no_header_col: bool,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_header_row: bool,

    /// Leave the last row in regular weight
    #[arg(long)]
    pub no_bold_final: bool,

    /// Escape LaTeX special characters in cell text
    #[arg(long)]
    pub escape: bool,
}

impl ConvertArgs {
    /// Arguments for `input` with nothing else set
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            stdout: false,
            config: None,
            kind: None,
            sheet: None,
            label: None,
            caption: None,
            margin: None,
            page_width: None,
            delimiter: None,
            format: None,
            no_header_col: false,
            no_header_row: false,
            no_bold_final: false,
            escape: false,
        }
    }

    /// Where the table is written
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => self.input.with_extension("tex"),
        }
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert(args) => {
            convert_command(&args)?;
        }
        Commands::Sheets { input } => {
            sheets_command(&input)?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` when it is set
fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// `RUST_LOG` directives win; without them (or when they do not parse)
/// the level is `warn`, or `debug` with `--verbose`
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

/// Layer options: built-in defaults, then the config file, then flags
pub fn resolve_options(args: &ConvertArgs) -> Result<TableOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            TableOptions::from_toml_str(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => TableOptions::default(),
    };

    options.excel = match args.kind {
        Some(InputKind::Excel) => true,
        Some(InputKind::Csv) => false,
        Some(InputKind::Auto) => SourceKind::from_path(&args.input) == SourceKind::Excel,
        None if args.config.is_some() => options.excel,
        None => SourceKind::from_path(&args.input) == SourceKind::Excel,
    };

    if let Some(sheet) = &args.sheet {
        options.sheet_name = sheet.clone();
    }
    if let Some(label) = &args.label {
        options.table_label = label.clone();
    }
    if let Some(caption) = &args.caption {
        options.caption = caption.clone();
    }
    if let Some(margin) = args.margin {
        options.margin = margin;
    }
    if let Some(page_width) = args.page_width {
        options.page_width = page_width;
    }
    if let Some(delimiter) = &args.delimiter {
        options.delimiter = parse_delimiter(delimiter)?;
    }
    if let Some(format) = &args.format {
        options.format_string = format.clone();
    }
    if args.no_header_col {
        options.header_col = false;
    }
    if args.no_header_row {
        options.header_row = false;
    }
    if args.no_bold_final {
        options.bold_final = false;
    }
    if args.escape {
        options.escape_special = true;
    }

    debug!(?options, "resolved options");
    Ok(options)
}

fn parse_delimiter(value: &str) -> Result<char> {
    match value {
        "tab" | "\\t" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => anyhow::bail!(
                    "Delimiter must be a single character or \"tab\", got \"{}\"",
                    value
                ),
            }
        }
    }
}

/// Execute the convert command
pub fn convert_command(args: &ConvertArgs) -> Result<()> {
    let input = &args.input;

    // Check input file exists
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let options = resolve_options(args)?;

    if args.stdout {
        let table = load_table(input, &options)
            .with_context(|| format!("Failed to read table: {}", input.display()))?;
        let markup = render_table(&table, &options)
            .with_context(|| format!("Failed to render table: {}", input.display()))?;
        println!("{}", markup);
        return Ok(());
    }

    let output = args.output_path();
    table_to_latex(input, &output, &options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    println!("Created: {}", output.display());

    Ok(())
}

/// Execute the sheets command
pub fn sheets_command(input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let sheets = TableLoader::list_sheets(input, SourceKind::from_path(input))
        .with_context(|| format!("Failed to list sheets: {}", input.display()))?;
    for sheet in sheets {
        println!("{}", sheet);
    }

    Ok(())
}
