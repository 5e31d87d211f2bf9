use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use obscore::writer::Compression;

mod export;
mod info;
mod schema;

/// ObsCore exporter - publish repository datasets as an ObsCore table
#[derive(Parser)]
#[command(name = "obscore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output file format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Apache Parquet
    Parquet,
    /// Comma (or configured delimiter) separated values with a header line
    Csv,
}

/// Parquet compression codec
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    /// No compression
    #[value(alias = "uncompressed")]
    None,
    /// Snappy
    Snappy,
    /// Gzip
    Gzip,
    /// LZ4
    Lz4,
    /// ZSTD
    Zstd,
    /// Brotli
    Brotli,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => Compression::None,
            CompressionArg::Snappy => Compression::Snappy,
            CompressionArg::Gzip => Compression::Gzip,
            CompressionArg::Lz4 => Compression::Lz4,
            CompressionArg::Zstd => Compression::Zstd,
            CompressionArg::Brotli => Compression::Brotli,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export datasets of a repository to an ObsCore file
    Export {
        /// Exporter configuration (TOML, or JSON with a .json extension)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        /// Repository snapshot (JSON)
        #[arg(short, long, value_name = "FILE")]
        repository: PathBuf,

        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Output format (default: from the output extension)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Collections to search, overrides the configuration
        #[arg(long, value_name = "NAME")]
        collections: Vec<String>,

        /// Dataset filter expression, overrides the configuration
        #[arg(long = "where", value_name = "EXPR")]
        where_clause: Option<String>,

        /// Rows per record batch, overrides the configuration
        #[arg(long)]
        batch_size: Option<usize>,

        /// Parquet compression, overrides the configuration
        #[arg(long, value_enum)]
        compression: Option<CompressionArg>,
    },

    /// Print the table schema resulting from a configuration
    Schema {
        /// Exporter configuration
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Display information about an exported Parquet file
    Info {
        /// Parquet file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Set up `env_logger`; `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Run the selected subcommand
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Export {
            config,
            repository,
            output,
            format,
            collections,
            where_clause,
            batch_size,
            compression,
        } => export::run(export::ExportArgs {
            config,
            repository,
            output,
            format,
            collections,
            where_clause,
            batch_size,
            compression: compression.map(Compression::from),
        }),
        Commands::Schema { config } => schema::run(config),
        Commands::Info { file } => info::run(file),
    }
}
