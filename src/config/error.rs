use std::path::PathBuf;

/// Errors that can occur while loading exporter configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// No dataset types were configured
    #[error("Configuration must define at least one dataset type")]
    NoDatasetTypes,

    /// Batch size of zero
    #[error("batch_size must be a positive number")]
    InvalidBatchSize,

    /// CSV delimiter that cannot be encoded in one byte
    #[error("csv_delimiter must be an ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    /// Spectral range with min above max
    #[error("Spectral range for {label:?} has min {min} above max {max}")]
    InvalidSpectralRange {
        /// Band or filter label
        label: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}
