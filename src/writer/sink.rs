use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::csv::{Writer as CsvWriter, WriterBuilder as CsvWriterBuilder};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Destination for the record batches of an export.
///
/// A sink is opened with the output schema before the first batch is
/// produced, receives batches strictly in order, and is finished exactly
/// once. Dropping a sink without finishing it abandons the output.
pub trait RecordBatchSink {
    /// Append one batch
    fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), WriterError>;

    /// Flush buffered data, finalize the output and return statistics
    fn finish(self) -> Result<WriterStats, WriterError>;
}

fn check_schema(expected: &SchemaRef, batch: &RecordBatch) -> Result<(), WriterError> {
    if batch.schema().fields() != expected.fields() {
        return Err(WriterError::SchemaMismatch(format!(
            "batch has {} columns, sink expects {}",
            batch.num_columns(),
            expected.fields().len()
        )));
    }
    Ok(())
}

/// Streaming writer for Parquet files
pub struct ParquetSink<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: SchemaRef,
    rows_written: usize,
    batches_written: usize,
}

impl ParquetSink<File> {
    /// Create a new sink writing to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        schema: SchemaRef,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, schema, config)
    }
}

impl<W: Write + Send> ParquetSink<W> {
    /// Create a new sink writing to any Write implementation
    pub fn new(writer: W, schema: SchemaRef, config: &WriterConfig) -> Result<Self, WriterError> {
        let props = config.to_writer_properties();
        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            rows_written: 0,
            batches_written: 0,
        })
    }

    /// Finalize and return the inner writer (for buffer extraction)
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        Ok(self.writer.into_inner()?)
    }
}

impl<W: Write + Send> RecordBatchSink for ParquetSink<W> {
    fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), WriterError> {
        check_schema(&self.schema, batch)?;
        self.writer.write(batch)?;
        self.rows_written += batch.num_rows();
        self.batches_written += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<WriterStats, WriterError> {
        let file_metadata = self.writer.finish()?;

        Ok(WriterStats {
            rows_written: self.rows_written,
            batches_written: self.batches_written,
            row_groups_written: file_metadata.row_groups.len(),
            // Includes the footer
            file_size_bytes: self.writer.bytes_written() as u64,
        })
    }
}

/// Streaming writer for delimited text files with a header line
pub struct CsvSink<W: Write> {
    writer: CsvWriter<W>,
    schema: SchemaRef,
    rows_written: usize,
    batches_written: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Create a new sink writing to a file path
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        schema: SchemaRef,
        config: &WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), schema, config))
    }
}

impl<W: Write> CsvSink<W> {
    /// Create a new sink writing to any Write implementation
    pub fn new(writer: W, schema: SchemaRef, config: &WriterConfig) -> Self {
        let writer = CsvWriterBuilder::new()
            .with_header(true)
            .with_delimiter(config.csv_delimiter)
            .build(writer);

        Self {
            writer,
            schema,
            rows_written: 0,
            batches_written: 0,
        }
    }

    /// Finalize and return the inner writer
    pub fn finish_into_inner(mut self) -> Result<W, WriterError> {
        self.write_header_if_empty()?;
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    // The header goes out with the first batch, so an export without rows
    // still needs one empty batch to produce it.
    fn write_header_if_empty(&mut self) -> Result<(), WriterError> {
        if self.batches_written == 0 {
            self.writer.write(&RecordBatch::new_empty(self.schema.clone()))?;
        }
        Ok(())
    }
}

impl<W: Write> RecordBatchSink for CsvSink<W> {
    fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), WriterError> {
        check_schema(&self.schema, batch)?;
        self.writer.write(batch)?;
        self.rows_written += batch.num_rows();
        self.batches_written += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<WriterStats, WriterError> {
        self.write_header_if_empty()?;
        let stats = WriterStats {
            rows_written: self.rows_written,
            batches_written: self.batches_written,
            row_groups_written: 0,
            file_size_bytes: 0,
        };
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(stats)
    }
}
