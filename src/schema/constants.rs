/// ObsCore data model version the static columns follow
pub const OBSCORE_VERSION: &str = "1.1";

/// Metadata key for the ObsCore version in the schema metadata
pub const KEY_OBSCORE_VERSION: &str = "obscore:version";

/// Metadata key for the producing software in the schema metadata
pub const KEY_PRODUCER: &str = "obscore:producer";

/// Field metadata key flagging columns that need attention
pub const KEY_COLUMN_STATUS: &str = "obscore:status";

/// Status of standard columns that the exporter never fills
pub const STATUS_NOT_FILLED: &str = "not_filled";

/// Status of columns that are not part of the ObsCore standard
pub const STATUS_NON_STANDARD: &str = "non_standard";

/// Status of columns added from `extra_columns` configuration
pub const STATUS_EXTRA: &str = "extra";
