use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::writer::Compression;

use super::error::ConfigError;

/// Default number of rows in one record batch
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Configuration describing dataset type-related options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetTypeConfig {
    /// Value for the `dataproduct_type` column.
    pub dataproduct_type: String,

    /// Value for the `dataproduct_subtype` column, optional.
    #[serde(default)]
    pub dataproduct_subtype: Option<String>,

    /// Value for the `calib_level` column.
    pub calib_level: i8,

    /// Value for the `o_ucd` column, optional.
    #[serde(default)]
    pub o_ucd: Option<String>,

    /// Value for the `access_format` column, optional.
    #[serde(default)]
    pub access_format: Option<String>,

    /// Template for the `obs_id` column, `{name}` placeholders refer to data
    /// ID values and to columns already assembled for the row.
    #[serde(default)]
    pub obs_id_fmt: Option<String>,

    /// Template for a DataLink `access_url`, used when storage URIs are
    /// disabled. DataLink generation is not implemented yet.
    #[serde(default)]
    pub datalink_url_fmt: Option<String>,

    /// Value for the `obs_collection` column, overrides the global value.
    #[serde(default)]
    pub obs_collection: Option<String>,

    /// Values for additional columns, in declaration order.
    #[serde(default)]
    pub extra_columns: Option<IndexMap<String, serde_json::Value>>,
}

impl DatasetTypeConfig {
    /// Minimal configuration with the two required values.
    pub fn new(dataproduct_type: impl Into<String>, calib_level: i8) -> Self {
        Self {
            dataproduct_type: dataproduct_type.into(),
            dataproduct_subtype: None,
            calib_level,
            o_ucd: None,
            access_format: None,
            obs_id_fmt: None,
            datalink_url_fmt: None,
            obs_collection: None,
            extra_columns: None,
        }
    }
}

/// Complete configuration for [`ObscoreExporter`](crate::exporter::ObscoreExporter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// Collections to search; all collections are searched when missing or
    /// empty. Can be overridden on the command line.
    #[serde(default)]
    pub collections: Option<Vec<String>>,

    /// Per-dataset type configuration, keyed by dataset type name. Types are
    /// exported in declaration order.
    pub dataset_types: IndexMap<String, DatasetTypeConfig>,

    /// Expression restricting the exported datasets, passed to the
    /// repository as is. Can be overridden on the command line.
    #[serde(default, rename = "where")]
    pub where_clause: Option<String>,

    /// Value for the `obs_collection` column.
    #[serde(default)]
    pub obs_collection: Option<String>,

    /// Value for the `facility_name` column.
    pub facility_name: String,

    /// Values for additional columns, in declaration order.
    #[serde(default)]
    pub extra_columns: Option<IndexMap<String, serde_json::Value>>,

    /// Maps a band or filter name to the min/max of its spectral range.
    #[serde(default)]
    pub spectral_ranges: BTreeMap<String, (f64, f64)>,

    /// Use storage URIs for `access_url`, otherwise generate DataLink URLs.
    #[serde(default = "default_true", alias = "use_butler_uri")]
    pub use_storage_uri: bool,

    /// Number of rows in one record batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Compression codec for Parquet output.
    #[serde(default)]
    pub parquet_compression: Compression,

    /// Field delimiter for CSV output.
    #[serde(default = "default_delimiter")]
    pub csv_delimiter: char,
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_delimiter() -> char {
    ','
}

impl ExporterConfig {
    /// Configuration with defaults for everything but the facility name.
    ///
    /// The result has no dataset types and does not pass [`validate`](Self::validate)
    /// until at least one is added.
    pub fn new(facility_name: impl Into<String>) -> Self {
        Self {
            collections: None,
            dataset_types: IndexMap::new(),
            where_clause: None,
            obs_collection: None,
            facility_name: facility_name.into(),
            extra_columns: None,
            spectral_ranges: BTreeMap::new(),
            use_storage_uri: true,
            batch_size: DEFAULT_BATCH_SIZE,
            parquet_compression: Compression::default(),
            csv_delimiter: ',',
        }
    }

    /// Load and validate configuration from a file.
    ///
    /// Files with a `.json` extension are parsed as JSON, everything else as
    /// TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse and validate TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset_types.is_empty() {
            return Err(ConfigError::NoDatasetTypes);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if !self.csv_delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(self.csv_delimiter));
        }
        for (name, (min, max)) in &self.spectral_ranges {
            if min > max {
                return Err(ConfigError::InvalidSpectralRange {
                    label: name.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }

    /// Collections to query, `None` meaning all of them.
    pub fn collections(&self) -> Option<&[String]> {
        match &self.collections {
            Some(collections) if !collections.is_empty() => Some(collections.as_slice()),
            _ => None,
        }
    }

    /// Obs collection for a dataset type, falling back to the global value.
    pub fn obs_collection_for<'a>(
        &'a self,
        dataset_config: &'a DatasetTypeConfig,
    ) -> Option<&'a str> {
        dataset_config
            .obs_collection
            .as_deref()
            .or(self.obs_collection.as_deref())
    }
}
