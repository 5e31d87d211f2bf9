use parquet::basic::{BrotliLevel, Compression as ParquetCodec, GzipLevel, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use serde::{Deserialize, Serialize};

/// Compression options for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// No compression (fastest write, largest files)
    #[serde(alias = "uncompressed")]
    None,
    /// Snappy compression (fast, moderate ratio)
    #[default]
    Snappy,
    /// Gzip compression (slower, better ratio)
    Gzip,
    /// LZ4 compression (very fast, lower ratio)
    Lz4,
    /// ZSTD compression (good balance of speed and ratio)
    Zstd,
    /// Brotli compression (slow, best ratio)
    Brotli,
}

impl Compression {
    /// Convert to the Parquet codec
    fn to_codec(self) -> ParquetCodec {
        match self {
            Compression::None => ParquetCodec::UNCOMPRESSED,
            Compression::Snappy => ParquetCodec::SNAPPY,
            Compression::Gzip => ParquetCodec::GZIP(GzipLevel::default()),
            Compression::Lz4 => ParquetCodec::LZ4_RAW,
            // ZSTD level 3 is a good balance of speed and compression
            Compression::Zstd => {
                ParquetCodec::ZSTD(ZstdLevel::try_new(3).unwrap_or(ZstdLevel::default()))
            }
            Compression::Brotli => ParquetCodec::BROTLI(BrotliLevel::default()),
        }
    }
}

/// Configuration for the output sinks
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Parquet compression codec
    pub compression: Compression,

    /// Maximum rows per Parquet row group
    pub row_group_size: usize,

    /// Parquet data page size in bytes
    pub data_page_size: usize,

    /// Whether to write Parquet column statistics
    pub write_statistics: bool,

    /// CSV field delimiter
    pub csv_delimiter: u8,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            // ObsCore tables are narrow, so large row groups stay small on disk
            row_group_size: 1024 * 1024,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            csv_delimiter: b',',
        }
    }
}

impl WriterConfig {
    /// Default configuration with the given compression
    pub fn with_compression(compression: Compression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(&self) -> WriterProperties {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        WriterProperties::builder()
            .set_compression(self.compression.to_codec())
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size)
            .set_created_by(format!(
                "{} version {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
    }
}
