use super::*;
use crate::config::{ColumnValue, DatasetTypeConfig, ExporterConfig};
use arrow::datatypes::DataType;
use indexmap::IndexMap;
use serde_json::json;

fn extras(pairs: &[(&str, serde_json::Value)]) -> Option<IndexMap<String, serde_json::Value>> {
    Some(
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

fn base_config() -> ExporterConfig {
    let mut config = ExporterConfig::new("Rubin");
    config
        .dataset_types
        .insert("calexp".to_string(), DatasetTypeConfig::new("image", 2));
    config
}

#[test]
fn test_static_schema_creation() {
    let schema = create_static_schema();
    assert_eq!(schema.fields().len(), 30);

    assert!(schema.field_with_name(columns::DATAPRODUCT_TYPE).is_ok());
    assert!(schema.field_with_name(columns::S_REGION).is_ok());
    assert!(schema.field_with_name(columns::INSTRUMENT_NAME).is_ok());

    let calib = schema.field_with_name(columns::CALIB_LEVEL).unwrap();
    assert_eq!(calib.data_type(), &DataType::Int8);
    assert!(calib.is_nullable());
}

#[test]
fn test_status_annotations() {
    let schema = create_static_schema();

    let did = schema.field_with_name(columns::OBS_PUBLISHER_DID).unwrap();
    assert_eq!(did.metadata().get(KEY_COLUMN_STATUS).unwrap(), STATUS_NOT_FILLED);

    let filter = schema.field_with_name(columns::EM_FILTER_NAME).unwrap();
    assert_eq!(filter.metadata().get(KEY_COLUMN_STATUS).unwrap(), STATUS_NON_STANDARD);

    let ra = schema.field_with_name(columns::S_RA).unwrap();
    assert!(ra.metadata().get(KEY_COLUMN_STATUS).is_none());

    assert_eq!(schema.metadata().get(KEY_OBSCORE_VERSION).unwrap(), OBSCORE_VERSION);
}

#[test]
fn test_schema_without_extras() {
    let schema = ObscoreSchema::build(&base_config()).unwrap();
    assert_eq!(schema.len(), 30);
    assert!(schema.extra_columns().is_empty());
    assert!(validate_schema(schema.schema()).is_ok());
}

#[test]
fn test_extra_column_types() {
    let mut config = base_config();
    config.extra_columns = extras(&[
        ("flag", json!(true)),
        ("tract", json!(3828)),
        ("pixel_scale", json!(0.2)),
        ("release", json!("DP0.2")),
    ]);

    let schema = ObscoreSchema::build(&config).unwrap();
    assert_eq!(schema.len(), 34);

    let arrow_schema = schema.schema();
    assert_eq!(arrow_schema.field_with_name("flag").unwrap().data_type(), &DataType::Boolean);
    assert_eq!(arrow_schema.field_with_name("tract").unwrap().data_type(), &DataType::Int64);
    assert_eq!(
        arrow_schema.field_with_name("pixel_scale").unwrap().data_type(),
        &DataType::Float64
    );
    assert_eq!(arrow_schema.field_with_name("release").unwrap().data_type(), &DataType::Utf8);

    // extras follow static columns, in declaration order
    let names: Vec<&str> = schema.column_names().skip(30).collect();
    assert_eq!(names, vec!["flag", "tract", "pixel_scale", "release"]);

    assert!(schema
        .extra_columns()
        .contains(&("tract".to_string(), ColumnValue::Int(3828))));
}

#[test]
fn test_first_definition_wins() {
    let mut config = base_config();
    config.extra_columns = extras(&[("release", json!("global"))]);

    let mut raw = DatasetTypeConfig::new("image", 1);
    raw.extra_columns = extras(&[("release", json!(7)), ("raw_only", json!(1))]);
    config.dataset_types.insert("raw".to_string(), raw);

    let schema = ObscoreSchema::build(&config).unwrap();
    assert_eq!(schema.len(), 32);
    assert_eq!(
        schema.schema().field_with_name("release").unwrap().data_type(),
        &DataType::Utf8
    );
    assert_eq!(
        schema.extra_columns(),
        &[
            ("release".to_string(), ColumnValue::Str("global".to_string())),
            ("raw_only".to_string(), ColumnValue::Int(1)),
        ]
    );
}

#[test]
fn test_extras_merge_in_declaration_order() {
    let toml = r#"
        facility_name = "Rubin"

        [extra_columns]
        zeta = 1
        alpha = "a"

        [dataset_types.raw]
        dataproduct_type = "image"
        calib_level = 1
        extra_columns = { shared = 5 }

        [dataset_types.calexp]
        dataproduct_type = "image"
        calib_level = 2
        extra_columns = { shared = "text" }
    "#;
    let config = ExporterConfig::from_toml_str(toml).unwrap();

    let schema = ObscoreSchema::build(&config).unwrap();
    let names: Vec<&str> = schema.column_names().skip(30).collect();
    assert_eq!(names, vec!["zeta", "alpha", "shared"]);
    assert_eq!(
        schema.schema().field_with_name("shared").unwrap().data_type(),
        &DataType::Int64
    );
}

#[test]
fn test_static_columns_present_once() {
    let mut config = base_config();
    config.extra_columns = extras(&[
        (columns::S_RA, json!("not a float")),
        (columns::CALIB_LEVEL, json!(9)),
    ]);
    let mut raw = DatasetTypeConfig::new("image", 1);
    raw.extra_columns = extras(&[(columns::OBS_ID, json!([1, 2, 3]))]);
    config.dataset_types.insert("raw".to_string(), raw);

    let schema = ObscoreSchema::build(&config).unwrap();
    assert_eq!(schema.len(), 30);
    for name in create_static_schema().fields().iter().map(|f| f.name()) {
        assert_eq!(schema.column_names().filter(|n| *n == name.as_str()).count(), 1);
    }
    assert_eq!(
        schema.schema().field_with_name(columns::S_RA).unwrap().data_type(),
        &DataType::Float64
    );
}

#[test]
fn test_unsupported_extra_type() {
    let mut config = base_config();
    config.extra_columns = extras(&[("tags", json!(["a", "b"]))]);

    match ObscoreSchema::build(&config) {
        Err(SchemaError::UnsupportedType { column, value }) => {
            assert_eq!(column, "tags");
            assert_eq!(value, r#"["a","b"]"#);
        }
        other => panic!("expected type error, got {:?}", other),
    }
}

#[test]
fn test_null_extra_value_rejected() {
    let mut config = base_config();
    let mut calexp = DatasetTypeConfig::new("image", 2);
    calexp.extra_columns = extras(&[("nothing", json!(null))]);
    config.dataset_types.insert("calexp".to_string(), calexp);

    assert!(matches!(
        ObscoreSchema::build(&config),
        Err(SchemaError::UnsupportedType { .. })
    ));
}

#[test]
fn test_validate_schema_type_mismatch() {
    use arrow::datatypes::{Field, Schema};

    let mut fields: Vec<Field> = create_static_schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    fields[3] = Field::new(columns::CALIB_LEVEL, DataType::Int64, true);
    let schema = Schema::new(fields);

    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaValidationError::TypeMismatch { .. })
    ));

    let partial = Schema::new(vec![Field::new(columns::OBS_ID, DataType::Utf8, true)]);
    assert!(matches!(
        validate_schema(&partial),
        Err(SchemaValidationError::MissingColumn(_))
    ));
}
