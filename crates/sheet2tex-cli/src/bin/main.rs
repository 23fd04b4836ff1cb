//! sheet2tex CLI binary entry point
//!
//! This is a thin wrapper that calls the library's `run_cli()` function.

use anyhow::Result;
use sheet2tex_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
