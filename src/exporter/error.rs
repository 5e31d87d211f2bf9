use crate::registry::RegistryError;
use crate::schema::SchemaError;
use crate::writer::WriterError;

/// Errors that can occur while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Extra column declared with a value that has no column type
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A row carried columns that are not part of the schema
    #[error("Unexpected column names: {}", .0.join(", "))]
    UnexpectedColumns(Vec<String>),

    /// The `obs_id` template could not be rendered
    #[error("Cannot format {template:?}: {message}")]
    Format {
        /// Template being rendered
        template: String,
        /// What went wrong
        message: String,
    },

    /// DataLink URL generation was requested
    #[error("DataLink URL generation is not implemented (dataset type {dataset_type})")]
    DataLinkNotImplemented {
        /// Dataset type whose `access_url` was requested
        dataset_type: String,
    },

    /// A row value does not fit into its column
    #[error("Column {column} expects {expected}, found {found}")]
    ColumnType {
        /// Column name
        column: String,
        /// Arrow type of the column
        expected: String,
        /// Offending value
        found: String,
    },

    /// Repository failure
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Output failure
    #[error("Writer error: {0}")]
    Writer(#[from] WriterError),

    /// Arrow failure while assembling a batch
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// I/O error inspecting the output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
