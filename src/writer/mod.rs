//! # Output Writers
//!
//! Sinks that persist the record batches produced by the exporter.
//!
//! ## Design Principles
//!
//! 1. **Streaming Architecture**: Batches are written as they are produced,
//!    so memory use is bounded by one batch regardless of the export size.
//!
//! 2. **Scoped Output**: A sink is created (and its file opened) before the
//!    first batch and finished once after the last; dropping a sink on error
//!    closes the file without finalizing it.
//!
//! 3. **Configurable Compression**: Parquet output supports Snappy (default),
//!    ZSTD, Gzip, LZ4 and uncompressed.
//!
//! Two formats are available: Parquet through [`ParquetSink`] and delimited
//! text with a header line through [`CsvSink`].

mod config;
mod error;
mod sink;
mod stats;


pub use config::{Compression, WriterConfig};
pub use error::WriterError;
pub use sink::{CsvSink, ParquetSink, RecordBatchSink};
pub use stats::WriterStats;
