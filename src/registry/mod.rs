//! # Repository Interface
//!
//! The exporter reads from a data repository through the narrow, read-only
//! [`Repository`] trait. The repository owns the query engine, the dimension
//! record model and file storage; this crate only consumes:
//!
//! 1. **Dataset queries**: expanded [`DatasetRef`]s of one dataset type,
//!    optionally restricted to a set of collections and a filter expression.
//! 2. **Visit records**: every visit in the repository, used to backfill
//!    regions of exposure-based datasets.
//! 3. **Storage locations**: the URI of a dataset's file.
//!
//! [`SnapshotRepository`] implements the trait over a JSON document and is
//! what the command-line tool reads.

mod snapshot;
mod types;

#[cfg(test)]
mod tests;

pub use snapshot::SnapshotRepository;
pub use types::{
    to_mjd, DataCoordinate, DatasetRef, DimensionValue, ExposureRecord, Timespan, VisitRecord,
};

/// Errors reported by a repository
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The dataset has no file in storage
    #[error("Datastore file does not exist for {0}")]
    FileNotFound(String),

    /// The repository cannot evaluate the query
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// I/O error reading repository content
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed repository content
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Any other backend failure
    #[error("Repository error: {0}")]
    Backend(String),
}

/// Lazily evaluated sequence of dataset references
pub type DatasetRefIter<'a> = Box<dyn Iterator<Item = Result<DatasetRef, RegistryError>> + 'a>;

/// Constraints of a dataset query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetQuery {
    /// Collections to search, `None` searches all collections
    pub collections: Option<Vec<String>>,
    /// Filter expression in the repository's query language
    pub where_clause: Option<String>,
}

/// Read-only access to a data repository
pub trait Repository {
    /// Query datasets of one type.
    ///
    /// Returned references must be expanded: their data IDs carry dimension
    /// records, timespan and region where the repository knows them. An
    /// unknown dataset type yields an empty sequence.
    fn query_datasets(
        &self,
        dataset_type: &str,
        query: &DatasetQuery,
    ) -> Result<DatasetRefIter<'_>, RegistryError>;

    /// All visit dimension records.
    fn query_visits(&self) -> Result<Vec<VisitRecord>, RegistryError>;

    /// Storage URI of a dataset.
    ///
    /// Returns [`RegistryError::FileNotFound`] when the dataset has no file.
    fn dataset_uri(&self, dataset: &DatasetRef) -> Result<String, RegistryError>;
}
