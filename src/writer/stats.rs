use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of rows written
    pub rows_written: usize,
    /// Number of record batches written
    pub batches_written: usize,
    /// Number of Parquet row groups written (0 for CSV)
    pub row_groups_written: usize,
    /// Bytes written, Parquet footer included (0 for CSV)
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows in {} batches ({} row groups, {} bytes)",
            self.rows_written, self.batches_written, self.row_groups_written, self.file_size_bytes
        )
    }
}
