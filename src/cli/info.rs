use anyhow::{Context, Result};
use std::path::PathBuf;

use obscore::schema::validate_schema;

/// Display information about an exported Parquet file
pub fn run(file: PathBuf) -> Result<()> {
    use parquet::arrow::parquet_to_arrow_schema;
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use std::fs::File;

    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let file_handle = File::open(&file).context("Failed to open file")?;
    let reader = SerializedFileReader::new(file_handle).context("Failed to read Parquet file")?;

    let metadata = reader.metadata();
    let file_metadata = metadata.file_metadata();

    println!("ObsCore File Information");
    println!("========================");
    println!("File: {}", file.display());
    if let Some(created_by) = file_metadata.created_by() {
        println!("Created by: {}", created_by);
    }
    println!();

    println!("File Statistics:");
    println!("  Row groups: {}", metadata.num_row_groups());
    println!("  Total rows: {}", file_metadata.num_rows());
    println!(
        "  Schema columns: {}",
        file_metadata.schema_descr().num_columns()
    );
    for (i, row_group) in metadata.row_groups().iter().enumerate() {
        println!(
            "  Row group {}: {} rows, {} bytes compressed",
            i,
            row_group.num_rows(),
            row_group.compressed_size()
        );
    }
    println!();

    let arrow_schema = parquet_to_arrow_schema(
        file_metadata.schema_descr(),
        file_metadata.key_value_metadata(),
    )
    .context("Failed to read Arrow schema")?;

    match validate_schema(&arrow_schema) {
        Ok(()) => println!("ObsCore columns: complete"),
        Err(e) => println!("ObsCore columns: {}", e),
    }
    println!();

    println!("Schema:");
    for (i, field) in arrow_schema.fields().iter().enumerate() {
        println!("  {:3}. {} ({})", i + 1, field.name(), field.data_type());
    }

    Ok(())
}
