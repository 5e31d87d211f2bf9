use arrow::record_batch::RecordBatch;
use indexmap::map;
use log::{debug, warn};

use crate::config::{ColumnValue, DatasetTypeConfig, ExporterConfig};
use crate::registry::{DatasetQuery, DatasetRef, DatasetRefIter, RegistryError, Repository};
use crate::schema::columns;

use super::batch::BatchCollector;
use super::error::ExportError;
use super::format::format_template;
use super::region::region_to_columns;
use super::row::Row;
use super::spectral::spectral_to_columns;
use super::visit_regions::VisitRegionCache;

/// Optional configuration columns that templates may name while unset; they
/// render as an empty string.
const OPTIONAL_TEMPLATE_COLUMNS: [&str; 4] = [
    columns::OBS_COLLECTION,
    columns::DATAPRODUCT_SUBTYPE,
    columns::O_UCD,
    columns::ACCESS_FORMAT,
];

/// Turns one dataset reference into one ObsCore row
pub(super) struct RecordAssembler<'a, R: Repository + ?Sized> {
    pub(super) repository: &'a R,
    pub(super) config: &'a ExporterConfig,
    pub(super) extra_columns: &'a [(String, ColumnValue)],
    pub(super) visit_regions: &'a mut VisitRegionCache,
}

impl<'a, R: Repository + ?Sized> RecordAssembler<'a, R> {
    fn assemble(
        &mut self,
        dataset_type: &str,
        type_config: &DatasetTypeConfig,
        dataset: &DatasetRef,
    ) -> Result<Row, ExportError> {
        let config = self.config;
        let data_id = &dataset.data_id;
        let mut row = Row::new();

        row.set(columns::DATAPRODUCT_TYPE, type_config.dataproduct_type.as_str());
        row.set_opt(columns::DATAPRODUCT_SUBTYPE, type_config.dataproduct_subtype.as_deref());
        row.set_opt(columns::O_UCD, type_config.o_ucd.as_deref());
        row.set(columns::FACILITY_NAME, config.facility_name.as_str());
        row.set(columns::CALIB_LEVEL, type_config.calib_level);
        row.set_opt(columns::OBS_COLLECTION, config.obs_collection_for(type_config));
        row.set_opt(columns::ACCESS_FORMAT, type_config.access_format.as_deref());

        if let Some(instrument) = data_id.get("instrument") {
            row.set(columns::INSTRUMENT_NAME, instrument.to_string());
        }

        if let Some(timespan) = data_id.timespan() {
            row.set_opt(columns::T_MIN, timespan.begin_mjd());
            row.set_opt(columns::T_MAX, timespan.end_mjd());
        }

        let mut region = data_id.region().cloned();
        if let Some(exposure) = data_id.exposure() {
            row.set_opt(columns::T_EXPTIME, exposure.exposure_time);
            row.set_opt(columns::TARGET_NAME, exposure.target_name.as_deref());
            if region.is_none() {
                region = self.visit_regions.lookup(
                    self.repository,
                    &exposure.instrument,
                    exposure.group_id,
                )?;
            }
        } else if let Some(visit) = data_id.visit() {
            row.set_opt(columns::T_EXPTIME, visit.exposure_time);
            row.set_opt(columns::TARGET_NAME, visit.target_name.as_deref());
        }
        region_to_columns(region.as_ref(), &mut row);

        if let Some(band) = data_id.get("band") {
            let filter = data_id.get("physical_filter").map(ToString::to_string);
            spectral_to_columns(
                &config.spectral_ranges,
                &band.to_string(),
                filter.as_deref(),
                &mut row,
            );
        }

        if let Some(template) = &type_config.obs_id_fmt {
            let obs_id = format_template(template, |name| {
                data_id
                    .get(name)
                    .map(ColumnValue::from)
                    .or_else(|| row.get(name).cloned())
                    .or_else(|| {
                        OPTIONAL_TEMPLATE_COLUMNS
                            .contains(&name)
                            .then_some(ColumnValue::Str(String::new()))
                    })
            })?;
            row.set(columns::OBS_ID, obs_id);
        }

        if config.use_storage_uri {
            match self.repository.dataset_uri(dataset) {
                Ok(uri) => row.set(columns::ACCESS_URL, uri),
                Err(RegistryError::FileNotFound(_)) => {
                    warn!("Datastore file does not exist for {}", dataset)
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            return Err(ExportError::DataLinkNotImplemented {
                dataset_type: dataset_type.to_string(),
            });
        }

        for (name, value) in self.extra_columns {
            row.set(name.as_str(), value.clone());
        }

        debug!("Assembled {} columns for {}", row.len(), dataset);
        Ok(row)
    }
}

struct CurrentType<'a> {
    name: &'a str,
    config: &'a DatasetTypeConfig,
    refs: DatasetRefIter<'a>,
}

/// Lazy sequence of ObsCore rows.
///
/// Dataset types are queried one after the other in declaration order; a query
/// is only issued once the rows of the previous type are exhausted. The
/// sequence ends after the first error.
pub struct Rows<'a, R: Repository + ?Sized> {
    assembler: RecordAssembler<'a, R>,
    query: DatasetQuery,
    pending: map::Iter<'a, String, DatasetTypeConfig>,
    current: Option<CurrentType<'a>>,
    finished: bool,
}

impl<'a, R: Repository + ?Sized> Rows<'a, R> {
    pub(super) fn new(assembler: RecordAssembler<'a, R>) -> Self {
        let config = assembler.config;
        let query = DatasetQuery {
            collections: config.collections().map(<[String]>::to_vec),
            where_clause: config.where_clause.clone(),
        };

        Self {
            pending: config.dataset_types.iter(),
            assembler,
            query,
            current: None,
            finished: false,
        }
    }

    fn fail(&mut self, error: ExportError) -> Option<Result<Row, ExportError>> {
        self.finished = true;
        self.current = None;
        Some(Err(error))
    }
}

impl<'a, R: Repository + ?Sized> Iterator for Rows<'a, R> {
    type Item = Result<Row, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(current) = &mut self.current {
                match current.refs.next() {
                    Some(Ok(dataset)) => {
                        let result = self
                            .assembler
                            .assemble(current.name, current.config, &dataset);
                        return match result {
                            Ok(row) => Some(Ok(row)),
                            Err(e) => self.fail(e),
                        };
                    }
                    Some(Err(e)) => return self.fail(e.into()),
                    None => self.current = None,
                }
            }

            let Some((name, config)) = self.pending.next() else {
                self.finished = true;
                return None;
            };

            debug!("Querying datasets of type {}", name);
            let repository = self.assembler.repository;
            match repository.query_datasets(name, &self.query) {
                Ok(refs) => {
                    self.current = Some(CurrentType {
                        name: name.as_str(),
                        config,
                        refs,
                    })
                }
                Err(e) => return self.fail(e.into()),
            }
        }
    }
}

/// Lazy sequence of record batches of at most `batch_size` rows.
///
/// Rows are pulled only as batches are consumed, so at most one batch is
/// held in memory. The last batch may be shorter; an export without rows
/// yields no batches.
pub struct RecordBatches<'a, R: Repository + ?Sized> {
    rows: Rows<'a, R>,
    collector: BatchCollector,
    batch_size: usize,
    done: bool,
}

impl<'a, R: Repository + ?Sized> RecordBatches<'a, R> {
    pub(super) fn new(rows: Rows<'a, R>, collector: BatchCollector, batch_size: usize) -> Self {
        Self {
            rows,
            collector,
            batch_size: batch_size.max(1),
            done: false,
        }
    }

    fn flush(&mut self) -> Option<Result<RecordBatch, ExportError>> {
        match self.collector.make_record_batch() {
            Ok(Some(batch)) => {
                debug!("Emitting batch of {} rows", batch.num_rows());
                Some(Ok(batch))
            }
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, R: Repository + ?Sized> Iterator for RecordBatches<'a, R> {
    type Item = Result<RecordBatch, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(row) = self.rows.next() {
            if let Err(e) = row.and_then(|row| self.collector.add_to_batch(row)) {
                self.done = true;
                return Some(Err(e));
            }
            if self.collector.len() >= self.batch_size {
                return self.flush();
            }
        }

        self.done = true;
        self.flush()
    }
}
