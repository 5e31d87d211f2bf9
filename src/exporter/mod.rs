//! # ObsCore Exporter
//!
//! Converts dataset references of a [`Repository`](crate::registry::Repository)
//! into ObsCore rows and streams them out as Arrow record batches.
//!
//! ## Pipeline
//!
//! ```text
//! Repository ──query──▶ DatasetRef ──assemble──▶ Row ──collect──▶ RecordBatch ──▶ Sink
//! ```
//!
//! Each stage is pull based: a batch is only assembled when the consumer
//! asks for it, and rows are only requested from the repository as the batch
//! fills up.
//!
//! ## Row assembly
//!
//! For every dataset reference the exporter fills:
//!
//! - constant columns from the dataset type configuration and global
//!   configuration (`dataproduct_type`, `calib_level`, `facility_name`, ...)
//! - `t_min`/`t_max` from the data ID timespan, as MJD
//! - `s_ra`, `s_dec`, `s_fov` and `s_region` from the data ID region, or from
//!   the region of the exposure's visit
//! - `em_min`/`em_max` from the spectral range of the filter or band
//! - `obs_id` from the dataset type template
//! - `access_url` from the storage URI of the dataset
//! - the configured extra columns
//!
//! ## Example
//!
//! ```rust,no_run
//! use obscore::config::ExporterConfig;
//! use obscore::exporter::ObscoreExporter;
//! use obscore::registry::SnapshotRepository;
//!
//! let config = ExporterConfig::from_file("obscore.toml")?;
//! let repository = SnapshotRepository::from_file("repo.json")?;
//!
//! let mut exporter = ObscoreExporter::new(&repository, config)?;
//! let stats = exporter.to_parquet("obscore.parquet")?;
//! println!("{}", stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assembler;
mod batch;
mod error;
mod exporter_impl;
mod format;
mod region;
mod row;
mod spectral;
mod stats;
mod visit_regions;


pub use assembler::{RecordBatches, Rows};
pub use batch::BatchCollector;
pub use error::ExportError;
pub use exporter_impl::ObscoreExporter;
pub use format::format_template;
pub use region::region_to_columns;
pub use row::Row;
pub use spectral::spectral_to_columns;
pub use stats::ExportStats;
pub use visit_regions::VisitRegionCache;
