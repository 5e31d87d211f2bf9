use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::types::{DatasetRef, VisitRecord};
use super::{DatasetQuery, DatasetRefIter, Repository, RegistryError};

/// Dataset entry of a snapshot document
#[derive(Debug, Deserialize)]
struct SnapshotDataset {
    #[serde(flatten)]
    dataset: DatasetRef,
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    datasets: Vec<SnapshotDataset>,
    #[serde(default)]
    visits: Vec<VisitRecord>,
}

/// In-memory repository loaded from a JSON snapshot.
///
/// The document lists expanded datasets (with an optional storage `uri`) and
/// visit records:
///
/// ```json
/// {
///   "datasets": [
///     {"id": "a1", "dataset_type": "calexp", "run": "runs/1",
///      "data_id": {"values": {"instrument": "HSC", "visit": 1228, "band": "r"}},
///      "uri": "s3://bucket/calexp/a1.fits"}
///   ],
///   "visits": [
///     {"instrument": "HSC", "id": 1228, "exposure_time": 30.0}
///   ]
/// }
/// ```
///
/// Collection constraints match the dataset's run. Filter expressions are
/// rejected since there is no query language to evaluate them.
#[derive(Debug, Default)]
pub struct SnapshotRepository {
    datasets: Vec<DatasetRef>,
    uris: HashMap<String, String>,
    visits: Vec<VisitRecord>,
}

impl SnapshotRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot document from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let reader = BufReader::new(File::open(path)?);
        let document: SnapshotDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_document(document))
    }

    /// Parse a snapshot document
    pub fn from_json_str(content: &str) -> Result<Self, RegistryError> {
        let document: SnapshotDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: SnapshotDocument) -> Self {
        let mut repository = Self::new();
        for entry in document.datasets {
            repository.add_dataset(entry.dataset, entry.uri);
        }
        repository.visits = document.visits;
        repository
    }

    /// Add a dataset, with its storage URI if it has a file
    pub fn add_dataset(&mut self, dataset: DatasetRef, uri: Option<String>) {
        if let Some(uri) = uri {
            self.uris.insert(dataset.id.clone(), uri);
        }
        self.datasets.push(dataset);
    }

    /// Add a visit record
    pub fn add_visit(&mut self, visit: VisitRecord) {
        self.visits.push(visit);
    }

    /// Number of datasets of all types
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// True if the repository holds no datasets
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Repository for SnapshotRepository {
    fn query_datasets(
        &self,
        dataset_type: &str,
        query: &DatasetQuery,
    ) -> Result<DatasetRefIter<'_>, RegistryError> {
        if let Some(expression) = &query.where_clause {
            return Err(RegistryError::UnsupportedQuery(format!(
                "snapshot repository cannot evaluate filter expression {:?}",
                expression
            )));
        }

        debug!(
            "Snapshot query for {} in collections {:?}",
            dataset_type, query.collections
        );

        let dataset_type = dataset_type.to_string();
        let collections = query.collections.clone();
        let iter = self
            .datasets
            .iter()
            .filter(move |dataset| dataset.dataset_type == dataset_type)
            .filter(move |dataset| match &collections {
                Some(collections) => collections.iter().any(|c| *c == dataset.run),
                None => true,
            })
            .cloned()
            .map(Ok);

        Ok(Box::new(iter))
    }

    fn query_visits(&self) -> Result<Vec<VisitRecord>, RegistryError> {
        Ok(self.visits.clone())
    }

    fn dataset_uri(&self, dataset: &DatasetRef) -> Result<String, RegistryError> {
        self.uris
            .get(&dataset.id)
            .cloned()
            .ok_or_else(|| RegistryError::FileNotFound(dataset.to_string()))
    }
}
