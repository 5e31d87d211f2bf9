//! # ObsCore Exporter
//!
//! Command-line tool exporting the datasets of a repository snapshot as an
//! ObsCore table.
//!
//! ## Usage
//!
//! ```bash
//! # Export to Parquet
//! obscore export --config obscore.toml --repository repo.json --output obscore.parquet
//!
//! # Export to CSV, restricted to one collection
//! obscore export -c obscore.toml -r repo.json -o obscore.csv --collections HSC/runs/RC2
//!
//! # Show the table schema resulting from a configuration
//! obscore schema --config obscore.toml
//!
//! # Inspect an exported file
//! obscore info obscore.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dispatch(cli)
}
