use std::fs;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use log::info;

use crate::config::ExporterConfig;
use crate::registry::Repository;
use crate::schema::ObscoreSchema;
use crate::writer::{CsvSink, ParquetSink, RecordBatchSink, WriterConfig};

use super::assembler::{RecordAssembler, RecordBatches, Rows};
use super::batch::BatchCollector;
use super::error::ExportError;
use super::stats::ExportStats;
use super::visit_regions::VisitRegionCache;

/// Exports datasets of a repository as ObsCore records.
///
/// The exporter borrows the repository, owns its configuration and the
/// schema derived from it, and keeps the visit region table between
/// exports.
pub struct ObscoreExporter<'r, R: Repository + ?Sized> {
    repository: &'r R,
    config: ExporterConfig,
    schema: ObscoreSchema,
    visit_regions: VisitRegionCache,
}

impl<'r, R: Repository + ?Sized> ObscoreExporter<'r, R> {
    /// Create an exporter, building the output schema.
    ///
    /// Fails if an extra column value has no column type.
    pub fn new(repository: &'r R, config: ExporterConfig) -> Result<Self, ExportError> {
        let schema = ObscoreSchema::build(&config)?;
        Ok(Self {
            repository,
            config,
            schema,
            visit_regions: VisitRegionCache::new(),
        })
    }

    /// Arrow schema of the exported table
    pub fn schema(&self) -> &SchemaRef {
        self.schema.schema()
    }

    /// Exporter configuration
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Output settings derived from the configuration
    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig {
            compression: self.config.parquet_compression,
            csv_delimiter: u8::try_from(self.config.csv_delimiter).unwrap_or(b','),
            ..WriterConfig::default()
        }
    }

    /// Lazily assembled rows of all configured dataset types
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows::new(RecordAssembler {
            repository: self.repository,
            config: &self.config,
            extra_columns: self.schema.extra_columns(),
            visit_regions: &mut self.visit_regions,
        })
    }

    /// Lazily assembled record batches of `batch_size` rows
    pub fn record_batches(&mut self) -> RecordBatches<'_, R> {
        let collector = BatchCollector::new(self.schema.schema().clone());
        let batch_size = self.config.batch_size;
        RecordBatches::new(self.rows(), collector, batch_size)
    }

    /// Write all batches to a sink and finish it.
    ///
    /// The sink is finished even when no batch was produced, so the output
    /// always carries the schema. On error the sink is dropped unfinished.
    pub fn export<S: RecordBatchSink>(&mut self, mut sink: S) -> Result<ExportStats, ExportError> {
        let mut stats = ExportStats {
            dataset_types: self.config.dataset_types.len(),
            ..ExportStats::default()
        };

        for batch in self.record_batches() {
            let batch = batch?;
            sink.write_batch(&batch)?;
            stats.rows_written += batch.num_rows();
            stats.batches_written += 1;
        }

        let writer_stats = sink.finish()?;
        stats.bytes_written = writer_stats.file_size_bytes;
        info!(
            "Exported {} rows in {} batches",
            stats.rows_written, stats.batches_written
        );
        Ok(stats)
    }

    /// Export to a Parquet file
    pub fn to_parquet<P: AsRef<Path>>(&mut self, path: P) -> Result<ExportStats, ExportError> {
        let path = path.as_ref();
        let sink = ParquetSink::new_file(path, self.schema().clone(), &self.writer_config())?;
        let mut stats = self.export(sink)?;
        stats.bytes_written = fs::metadata(path)?.len();
        Ok(stats)
    }

    /// Export to a CSV file with a header line
    pub fn to_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ExportStats, ExportError> {
        let path = path.as_ref();
        let sink = CsvSink::new_file(path, self.schema().clone(), &self.writer_config())?;
        let mut stats = self.export(sink)?;
        stats.bytes_written = fs::metadata(path)?.len();
        Ok(stats)
    }
}
