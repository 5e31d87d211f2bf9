//! # Exporter Configuration
//!
//! Configuration is split between global settings ([`ExporterConfig`]) and
//! per-dataset type settings ([`DatasetTypeConfig`]). Values that are absent
//! in a dataset type configuration fall back to the global ones.
//!
//! Configuration is usually loaded from a TOML file:
//!
//! ```toml
//! facility_name = "Rubin-LSST"
//! obs_collection = "LSST.DP02"
//! collections = ["2.2i/runs/DP0.2"]
//! batch_size = 10000
//! parquet_compression = "zstd"
//!
//! [extra_columns]
//! lsst_run = "DP0.2"
//!
//! [spectral_ranges]
//! g = [4.05e-7, 5.52e-7]
//! r = [5.52e-7, 6.91e-7]
//!
//! [dataset_types.calexp]
//! dataproduct_type = "image"
//! calib_level = 2
//! obs_id_fmt = "{visit}-{detector}"
//! access_format = "image/fits"
//! ```
//!
//! Extra column values are dynamically typed: booleans, integers, floats and
//! strings are accepted, and the column type is inferred from the value when
//! the schema is built.

mod error;
mod exporter;
mod value;


pub use error::ConfigError;
pub use exporter::{DatasetTypeConfig, ExporterConfig, DEFAULT_BATCH_SIZE};
pub use value::ColumnValue;
