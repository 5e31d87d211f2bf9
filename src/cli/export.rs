use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use obscore::config::ExporterConfig;
use obscore::exporter::ObscoreExporter;
use obscore::registry::SnapshotRepository;
use obscore::writer::Compression;

use super::FormatArg;

/// Arguments of the export subcommand
pub struct ExportArgs {
    pub config: PathBuf,
    pub repository: PathBuf,
    pub output: PathBuf,
    pub format: Option<FormatArg>,
    pub collections: Vec<String>,
    pub where_clause: Option<String>,
    pub batch_size: Option<usize>,
    pub compression: Option<Compression>,
}

fn format_from_extension(path: &Path) -> FormatArg {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => FormatArg::Csv,
        _ => FormatArg::Parquet,
    }
}

/// Export a repository snapshot to an ObsCore file
pub fn run(args: ExportArgs) -> Result<()> {
    let mut config = ExporterConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;

    if !args.collections.is_empty() {
        config.collections = Some(args.collections);
    }
    if args.where_clause.is_some() {
        config.where_clause = args.where_clause;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(compression) = args.compression {
        config.parquet_compression = compression;
    }
    config.validate().context("Invalid configuration")?;

    let repository = SnapshotRepository::from_file(&args.repository).with_context(|| {
        format!("Failed to load repository {}", args.repository.display())
    })?;

    let format = args.format.unwrap_or_else(|| format_from_extension(&args.output));

    info!("ObsCore export");
    info!("==============");
    info!("Repository: {} ({} datasets)", args.repository.display(), repository.len());
    info!("Output:     {} ({:?})", args.output.display(), format);
    info!("Dataset types: {}", config.dataset_types.len());
    info!("Batch size: {}", config.batch_size);

    let mut exporter =
        ObscoreExporter::new(&repository, config).context("Failed to create exporter")?;
    let stats = match format {
        FormatArg::Parquet => exporter.to_parquet(&args.output),
        FormatArg::Csv => exporter.to_csv(&args.output),
    }
    .with_context(|| format!("Export to {} failed", args.output.display()))?;

    info!("{}", stats);
    println!(
        "Wrote {} rows to {}",
        stats.rows_written,
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension(Path::new("out.csv")), FormatArg::Csv);
        assert_eq!(format_from_extension(Path::new("out.CSV")), FormatArg::Csv);
        assert_eq!(format_from_extension(Path::new("out.parquet")), FormatArg::Parquet);
        assert_eq!(format_from_extension(Path::new("out")), FormatArg::Parquet);
    }
}
