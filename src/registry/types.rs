use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ColumnValue;
use crate::geometry::Region;

/// MJD of the Unix epoch (1970-01-01T00:00:00)
const MJD_UNIX_EPOCH: f64 = 40_587.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a timestamp to Modified Julian Date.
///
/// The timestamp is taken in whatever scale the repository recorded it;
/// no leap second correction is applied.
pub fn to_mjd(time: &DateTime<Utc>) -> f64 {
    let seconds = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
    MJD_UNIX_EPOCH + seconds / SECONDS_PER_DAY
}

/// Value of a single dimension in a data ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    /// Integer key (visit, exposure, detector, ...)
    Int(i64),
    /// String key (instrument, band, physical_filter, ...)
    Str(String),
}

impl DimensionValue {
    /// String value, `None` for integer keys
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DimensionValue::Str(s) => Some(s),
            DimensionValue::Int(_) => None,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Int(i) => write!(f, "{}", i),
            DimensionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&DimensionValue> for ColumnValue {
    fn from(value: &DimensionValue) -> Self {
        match value {
            DimensionValue::Int(i) => ColumnValue::Int(*i),
            DimensionValue::Str(s) => ColumnValue::Str(s.clone()),
        }
    }
}

impl From<i64> for DimensionValue {
    fn from(value: i64) -> Self {
        DimensionValue::Int(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        DimensionValue::Str(value.to_string())
    }
}

/// Time interval, either end may be unbounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timespan {
    /// Inclusive start
    #[serde(default)]
    pub begin: Option<DateTime<Utc>>,
    /// Exclusive end
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl Timespan {
    /// Bounded timespan
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
        }
    }

    /// Start as MJD
    pub fn begin_mjd(&self) -> Option<f64> {
        self.begin.as_ref().map(to_mjd)
    }

    /// End as MJD
    pub fn end_mjd(&self) -> Option<f64> {
        self.end.as_ref().map(to_mjd)
    }
}

/// Exposure dimension record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRecord {
    /// Instrument name
    pub instrument: String,
    /// Exposure identifier
    pub id: i64,
    /// Identifier of the visit (group) this exposure belongs to
    pub group_id: i64,
    /// Exposure time in seconds
    #[serde(default)]
    pub exposure_time: Option<f64>,
    /// Name of the observed target
    #[serde(default)]
    pub target_name: Option<String>,
}

/// Visit dimension record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Instrument name
    pub instrument: String,
    /// Visit identifier
    pub id: i64,
    /// Exposure time in seconds
    #[serde(default)]
    pub exposure_time: Option<f64>,
    /// Name of the observed target
    #[serde(default)]
    pub target_name: Option<String>,
    /// Sky region covered by the visit
    #[serde(default)]
    pub region: Option<Region>,
}

/// Expanded data ID: dimension values plus the records and derived
/// geometry/time they imply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataCoordinate {
    #[serde(default)]
    values: BTreeMap<String, DimensionValue>,
    #[serde(default)]
    timespan: Option<Timespan>,
    #[serde(default)]
    region: Option<Region>,
    #[serde(default)]
    exposure: Option<ExposureRecord>,
    #[serde(default)]
    visit: Option<VisitRecord>,
}

impl DataCoordinate {
    /// Empty data ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<DimensionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Attach a timespan
    pub fn with_timespan(mut self, timespan: Timespan) -> Self {
        self.timespan = Some(timespan);
        self
    }

    /// Attach a region
    pub fn with_region(mut self, region: impl Into<Region>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Attach the exposure record
    pub fn with_exposure(mut self, record: ExposureRecord) -> Self {
        self.exposure = Some(record);
        self
    }

    /// Attach the visit record
    pub fn with_visit(mut self, record: VisitRecord) -> Self {
        self.visit = Some(record);
        self
    }

    /// Value of a dimension
    pub fn get(&self, name: &str) -> Option<&DimensionValue> {
        self.values.get(name)
    }

    /// All dimension values by name
    pub fn values(&self) -> &BTreeMap<String, DimensionValue> {
        &self.values
    }

    /// Timespan of the data ID
    pub fn timespan(&self) -> Option<&Timespan> {
        self.timespan.as_ref()
    }

    /// Region of the data ID
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Exposure record, if the data ID includes the exposure dimension
    pub fn exposure(&self) -> Option<&ExposureRecord> {
        self.exposure.as_ref()
    }

    /// Visit record, if the data ID includes the visit dimension
    pub fn visit(&self) -> Option<&VisitRecord> {
        self.visit.as_ref()
    }
}

impl fmt::Display for DataCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

/// Reference to one dataset in the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Unique dataset identifier
    pub id: String,
    /// Dataset type name
    pub dataset_type: String,
    /// Run collection holding the dataset
    pub run: String,
    /// Expanded data ID
    #[serde(default)]
    pub data_id: DataCoordinate,
}

impl DatasetRef {
    /// Create a reference
    pub fn new(
        id: impl Into<String>,
        dataset_type: impl Into<String>,
        run: impl Into<String>,
        data_id: DataCoordinate,
    ) -> Self {
        Self {
            id: id.into(),
            dataset_type: dataset_type.into(),
            run: run.into(),
            data_id,
        }
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} [id={}, run={}]",
            self.dataset_type, self.data_id, self.id, self.run
        )
    }
}
