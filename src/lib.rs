//! # obscore - ObsCore Table Exporter
//!
//! `obscore` turns the datasets registered in a data repository into rows of
//! an [IVOA ObsCore](https://www.ivoa.net/documents/ObsCore/) table, the
//! standard description of astronomical observations used by Virtual
//! Observatory services.
//!
//! ## Key Features
//!
//! - **Streaming Export**: Rows are assembled lazily and emitted as Arrow
//!   record batches of bounded size, so exports of millions of datasets run
//!   in constant memory.
//!
//! - **Configurable Content**: Per dataset type product type, calibration
//!   level, `obs_id` template and constant extra columns, all driven by a
//!   TOML (or JSON) configuration file.
//!
//! - **Sky and Time Coverage**: Regions are reduced to bounding circles and
//!   ICRS polygons, timespans converted to Modified Julian Date, bands mapped
//!   to spectral ranges.
//!
//! - **Parquet and CSV Output**: Parquet with Snappy, ZSTD, Gzip, LZ4 or no
//!   compression, and delimited text with a header line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use obscore::config::{DatasetTypeConfig, ExporterConfig};
//! use obscore::exporter::ObscoreExporter;
//! use obscore::registry::SnapshotRepository;
//!
//! let mut config = ExporterConfig::new("Subaru");
//! config
//!     .dataset_types
//!     .insert("calexp".to_string(), DatasetTypeConfig::new("image", 2));
//! config.validate()?;
//!
//! let repository = SnapshotRepository::from_file("repo.json")?;
//! let mut exporter = ObscoreExporter::new(&repository, config)?;
//!
//! for batch in exporter.record_batches() {
//!     let batch = batch?;
//!     println!("{} rows", batch.num_rows());
//! }
//!
//! let stats = exporter.to_parquet("obscore.parquet")?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: exporter configuration and its validation
//! - [`registry`]: the [`Repository`](registry::Repository) interface and a
//!   JSON snapshot implementation
//! - [`geometry`]: spherical regions and their bounding circles
//! - [`schema`]: the ObsCore Arrow schema
//! - [`exporter`]: row assembly and batching
//! - [`writer`]: Parquet and CSV sinks

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod exporter;
pub mod geometry;
pub mod registry;
pub mod schema;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ColumnValue, ConfigError, DatasetTypeConfig, ExporterConfig};
    pub use crate::exporter::{ExportError, ExportStats, ObscoreExporter, Row};
    pub use crate::geometry::{Circle, ConvexPolygon, LonLat, Region};
    pub use crate::registry::{
        DataCoordinate, DatasetQuery, DatasetRef, RegistryError, Repository, SnapshotRepository,
    };
    pub use crate::schema::{columns, create_static_schema, validate_schema, ObscoreSchema};
    pub use crate::writer::{
        Compression, CsvSink, ParquetSink, RecordBatchSink, WriterConfig, WriterError, WriterStats,
    };
}
