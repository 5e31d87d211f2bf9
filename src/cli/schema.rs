use anyhow::{Context, Result};
use std::path::PathBuf;

use obscore::config::ExporterConfig;
use obscore::schema::{ObscoreSchema, KEY_COLUMN_STATUS};

/// Print the table schema resulting from a configuration
pub fn run(config: PathBuf) -> Result<()> {
    let exporter_config = ExporterConfig::from_file(&config)
        .with_context(|| format!("Failed to load configuration {}", config.display()))?;
    let schema = ObscoreSchema::build(&exporter_config).context("Failed to build schema")?;

    println!("ObsCore Schema");
    println!("==============");
    println!("Configuration: {}", config.display());
    println!("Columns: {} ({} extra)", schema.len(), schema.extra_columns().len());
    println!();

    for (i, field) in schema.schema().fields().iter().enumerate() {
        let status = field
            .metadata()
            .get(KEY_COLUMN_STATUS)
            .map(|status| format!(" [{}]", status))
            .unwrap_or_default();
        println!("  {:3}. {} ({}){}", i + 1, field.name(), field.data_type(), status);
    }

    if !schema.extra_columns().is_empty() {
        println!();
        println!("Extra column values:");
        for (name, value) in schema.extra_columns() {
            println!("  {}: {}", name, value);
        }
    }

    Ok(())
}
