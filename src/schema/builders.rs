use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder, SchemaRef};
use indexmap::IndexMap;
use log::debug;

use crate::config::{ColumnValue, ExporterConfig};

use super::columns;
use super::constants::{
    KEY_COLUMN_STATUS, KEY_OBSCORE_VERSION, KEY_PRODUCER, OBSCORE_VERSION, STATUS_EXTRA,
    STATUS_NON_STANDARD, STATUS_NOT_FILLED,
};
use super::error::SchemaError;

/// Creates a nullable Field, annotated with a status when it has one
fn annotated_field(name: &str, data_type: DataType, status: Option<&str>) -> Field {
    let field = Field::new(name, data_type, true);
    match status {
        Some(status) => {
            let mut metadata = HashMap::new();
            metadata.insert(KEY_COLUMN_STATUS.to_string(), status.to_string());
            field.with_metadata(metadata)
        }
        None => field,
    }
}

/// Standard columns of every ObsCore table.
///
/// Includes at least all mandatory columns of the ObsCore note (revision 1.1,
/// Appendix B). Types match what discovery services expect when loading the
/// table.
fn static_fields() -> Vec<Field> {
    let not_filled = Some(STATUS_NOT_FILLED);
    vec![
        annotated_field(columns::DATAPRODUCT_TYPE, DataType::Utf8, None),
        annotated_field(columns::DATAPRODUCT_SUBTYPE, DataType::Utf8, None),
        annotated_field(columns::FACILITY_NAME, DataType::Utf8, None),
        annotated_field(columns::CALIB_LEVEL, DataType::Int8, None),
        annotated_field(columns::TARGET_NAME, DataType::Utf8, None),
        annotated_field(columns::OBS_ID, DataType::Utf8, None),
        annotated_field(columns::OBS_COLLECTION, DataType::Utf8, None),
        annotated_field(columns::OBS_PUBLISHER_DID, DataType::Utf8, not_filled),
        annotated_field(columns::ACCESS_URL, DataType::Utf8, None),
        annotated_field(columns::ACCESS_FORMAT, DataType::Utf8, None),
        // Spatial
        annotated_field(columns::S_RA, DataType::Float64, None),
        annotated_field(columns::S_DEC, DataType::Float64, None),
        annotated_field(columns::S_FOV, DataType::Float64, None),
        annotated_field(columns::S_REGION, DataType::Utf8, None),
        annotated_field(columns::S_RESOLUTION, DataType::Float64, not_filled),
        annotated_field(columns::S_XEL1, DataType::Int16, not_filled),
        annotated_field(columns::S_XEL2, DataType::Int16, not_filled),
        // Temporal
        annotated_field(columns::T_XEL, DataType::Int16, not_filled),
        annotated_field(columns::T_MIN, DataType::Float64, None),
        annotated_field(columns::T_MAX, DataType::Float64, None),
        annotated_field(columns::T_EXPTIME, DataType::Float64, None),
        annotated_field(columns::T_RESOLUTION, DataType::Float64, not_filled),
        // Spectral
        annotated_field(columns::EM_XEL, DataType::Int16, not_filled),
        annotated_field(columns::EM_MIN, DataType::Float64, None),
        annotated_field(columns::EM_MAX, DataType::Float64, None),
        annotated_field(columns::EM_RES_POWER, DataType::Float64, not_filled),
        annotated_field(
            columns::EM_FILTER_NAME,
            DataType::Utf8,
            Some(STATUS_NON_STANDARD),
        ),
        annotated_field(columns::O_UCD, DataType::Utf8, None),
        annotated_field(columns::POL_XEL, DataType::Int16, not_filled),
        annotated_field(columns::INSTRUMENT_NAME, DataType::Utf8, None),
    ]
}

fn schema_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_OBSCORE_VERSION.to_string(), OBSCORE_VERSION.to_string());
    metadata.insert(
        KEY_PRODUCER.to_string(),
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    );
    metadata
}

/// Creates the Arrow schema holding only the standard ObsCore columns.
///
/// # Example
///
/// ```
/// use obscore::schema::create_static_schema;
///
/// let schema = create_static_schema();
/// assert_eq!(schema.fields().len(), 30);
/// ```
pub fn create_static_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    for field in static_fields() {
        builder.push(field);
    }
    builder.finish().with_metadata(schema_metadata())
}

/// Output schema of one exporter: the standard columns followed by extra
/// columns from configuration, plus the constant values of those extras.
#[derive(Debug, Clone)]
pub struct ObscoreSchema {
    schema: SchemaRef,
    extra_columns: Vec<(String, ColumnValue)>,
}

impl ObscoreSchema {
    /// Merge static columns with the extra columns of all configurations.
    ///
    /// Global extra columns are considered first, then those of each dataset
    /// type in declaration order. The first definition of a column name wins and
    /// later ones are ignored; static columns always win.
    ///
    /// Fails if an extra column value has no column type (null, array,
    /// table, or an integer outside the `i64` range).
    pub fn build(config: &ExporterConfig) -> Result<Self, SchemaError> {
        let mut builder = SchemaBuilder::new();
        let mut names = HashSet::new();
        for field in static_fields() {
            names.insert(field.name().clone());
            builder.push(field);
        }

        let all_extras = std::iter::once(config.extra_columns.as_ref()).chain(
            config
                .dataset_types
                .values()
                .map(|dataset_config| dataset_config.extra_columns.as_ref()),
        );

        let mut extra_columns = Vec::new();
        for extras in all_extras.flatten() {
            Self::merge_extras(extras, &mut names, &mut builder, &mut extra_columns)?;
        }

        let schema = builder.finish().with_metadata(schema_metadata());
        debug!(
            "Built schema with {} columns ({} extra)",
            schema.fields().len(),
            extra_columns.len()
        );

        Ok(Self {
            schema: Arc::new(schema),
            extra_columns,
        })
    }

    fn merge_extras(
        extras: &IndexMap<String, serde_json::Value>,
        names: &mut HashSet<String>,
        builder: &mut SchemaBuilder,
        extra_columns: &mut Vec<(String, ColumnValue)>,
    ) -> Result<(), SchemaError> {
        for (name, value) in extras {
            if names.contains(name) {
                continue;
            }
            let value = ColumnValue::from_json(value).ok_or_else(|| SchemaError::UnsupportedType {
                column: name.clone(),
                value: value.to_string(),
            })?;
            builder.push(annotated_field(name, value.data_type(), Some(STATUS_EXTRA)));
            names.insert(name.clone());
            extra_columns.push((name.clone(), value));
        }
        Ok(())
    }

    /// Arrow schema of the output
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Extra columns and the constant value every row gets for them
    pub fn extra_columns(&self) -> &[(String, ColumnValue)] {
        &self.extra_columns
    }

    /// Column names in schema order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema.fields().iter().map(|field| field.name().as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.schema.fields().len()
    }

    /// True if the schema has no columns, which never happens for a built schema
    pub fn is_empty(&self) -> bool {
        self.schema.fields().is_empty()
    }
}
