/// Errors building the output schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// An extra column value has no column type mapping
    #[error("Unexpected type in extra_columns: column={column}, value={value}")]
    UnsupportedType {
        /// Column name
        column: String,
        /// The offending value
        value: String,
    },
}
