/// Errors that can occur while writing output files
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library, including the CSV writer
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Batch does not match the schema the sink was opened with
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}
