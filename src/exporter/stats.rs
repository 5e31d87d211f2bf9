use std::fmt;

/// Statistics from a completed export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Number of rows written
    pub rows_written: usize,

    /// Number of record batches written
    pub batches_written: usize,

    /// Number of dataset types queried
    pub dataset_types: usize,

    /// Size of the output file in bytes (0 when writing to a stream)
    pub bytes_written: u64,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Export: {} rows in {} batches from {} dataset types, {} bytes",
            self.rows_written, self.batches_written, self.dataset_types, self.bytes_written
        )
    }
}
