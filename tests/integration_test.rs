//! Integration tests for the ObsCore exporter
//!
//! These tests run complete exports from configuration and repository files
//! to Parquet and CSV output and read the results back.

use arrow::array::{Array, AsArray};
use arrow::datatypes::Float64Type;
use obscore::config::ExporterConfig;
use obscore::exporter::ObscoreExporter;
use obscore::registry::SnapshotRepository;
use obscore::schema::{columns, validate_schema, KEY_OBSCORE_VERSION, OBSCORE_VERSION};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
facility_name = "Subaru"
obs_collection = "HSC.PDR"
batch_size = 2
parquet_compression = "zstd"

[extra_columns]
release = "PDR3"
priority = 5

[spectral_ranges]
"HSC-R" = [5.4e-7, 7.0e-7]
"HSC-I" = [6.9e-7, 8.4e-7]

[dataset_types.calexp]
dataproduct_type = "image"
dataproduct_subtype = "lsst.calexp"
calib_level = 2
obs_id_fmt = "{instrument}-{visit:07d}-{detector:03d}"
access_format = "image/fits"
o_ucd = "phot.count"

[dataset_types.raw]
dataproduct_type = "image"
calib_level = 1
obs_collection = "HSC.raw"
"#;

const REPOSITORY: &str = r#"{
    "datasets": [
        {"id": "c1", "dataset_type": "calexp", "run": "HSC/runs/RC2",
         "data_id": {
            "values": {"instrument": "HSC", "visit": 1228, "detector": 49, "band": "r",
                       "physical_filter": "HSC-R"},
            "timespan": {"begin": "2014-03-25T10:00:00Z", "end": "2014-03-25T10:00:30Z"},
            "region": {"type": "convex_polygon", "vertices": [
                {"lon": 150.0, "lat": 2.0}, {"lon": 150.2, "lat": 2.0},
                {"lon": 150.2, "lat": 2.2}, {"lon": 150.0, "lat": 2.2}]},
            "visit": {"instrument": "HSC", "id": 1228, "exposure_time": 30.0,
                      "target_name": "COSMOS"}
         },
         "uri": "file:///repo/calexp/c1.fits"},
        {"id": "c2", "dataset_type": "calexp", "run": "HSC/runs/RC2",
         "data_id": {"values": {"instrument": "HSC", "visit": 1230, "detector": 50, "band": "i",
                                "physical_filter": "HSC-I"}},
         "uri": "file:///repo/calexp/c2.fits"},
        {"id": "c3", "dataset_type": "calexp", "run": "HSC/runs/RC2",
         "data_id": {"values": {"instrument": "HSC", "visit": 1232, "detector": 51}}},
        {"id": "r1", "dataset_type": "raw", "run": "HSC/raw/all",
         "data_id": {
            "values": {"instrument": "HSC", "exposure": 1228, "detector": 49},
            "exposure": {"instrument": "HSC", "id": 1228, "group_id": 1228,
                         "exposure_time": 30.0, "target_name": "COSMOS"}
         },
         "uri": "file:///repo/raw/r1.fits"}
    ],
    "visits": [
        {"instrument": "HSC", "id": 1228, "exposure_time": 30.0,
         "region": {"type": "circle", "center": {"lon": 150.1, "lat": 2.1}, "radius": 0.8}}
    ]
}"#;

fn write_inputs(dir: &Path) -> (ExporterConfig, SnapshotRepository) {
    let config_path = dir.join("obscore.toml");
    let repo_path = dir.join("repo.json");
    fs::write(&config_path, CONFIG).unwrap();
    fs::write(&repo_path, REPOSITORY).unwrap();

    let config = ExporterConfig::from_file(&config_path).unwrap();
    let repository = SnapshotRepository::from_file(&repo_path).unwrap();
    (config, repository)
}

/// Test a complete export to Parquet and read it back
#[test]
fn test_parquet_export() {
    let dir = tempdir().unwrap();
    let (config, repository) = write_inputs(dir.path());
    let path = dir.path().join("obscore.parquet");

    let mut exporter = ObscoreExporter::new(&repository, config).unwrap();
    let stats = exporter.to_parquet(&path).unwrap();

    assert_eq!(stats.rows_written, 4);
    // batches span dataset types: [c1, c2], [c3, r1]
    assert_eq!(stats.batches_written, 2);
    assert_eq!(stats.dataset_types, 2);
    assert_eq!(stats.bytes_written, fs::metadata(&path).unwrap().len());

    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    assert_eq!(reader.metadata().file_metadata().num_rows(), 4);

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    let schema = builder.schema().clone();
    validate_schema(&schema).unwrap();
    assert_eq!(schema.fields().len(), 32);
    assert_eq!(
        schema.metadata().get(KEY_OBSCORE_VERSION).map(String::as_str),
        Some(OBSCORE_VERSION)
    );

    let batches: Vec<_> = builder
        .build()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let batch = arrow::compute::concat_batches(&schema, &batches).unwrap();

    let obs_id = batch.column_by_name(columns::OBS_ID).unwrap().as_string::<i32>();
    assert_eq!(obs_id.value(0), "HSC-0001228-049");
    assert_eq!(obs_id.value(2), "HSC-0001232-051");
    assert!(obs_id.is_null(3));

    let collection = batch.column_by_name(columns::OBS_COLLECTION).unwrap().as_string::<i32>();
    assert_eq!(collection.value(0), "HSC.PDR");
    assert_eq!(collection.value(3), "HSC.raw");

    let access_url = batch.column_by_name(columns::ACCESS_URL).unwrap().as_string::<i32>();
    assert_eq!(access_url.value(1), "file:///repo/calexp/c2.fits");
    assert!(access_url.is_null(2));

    let region = batch.column_by_name(columns::S_REGION).unwrap().as_string::<i32>();
    assert!(region.value(0).starts_with("POLYGON ICRS 150.000000 2.000000"));
    assert!(region.is_null(1));
    // raw region comes from the visit circle
    assert!(region.is_null(3));

    let fov = batch.column_by_name(columns::S_FOV).unwrap().as_primitive::<Float64Type>();
    assert!((fov.value(3) - 1.6).abs() < 1e-9);

    let em_min = batch.column_by_name(columns::EM_MIN).unwrap().as_primitive::<Float64Type>();
    assert_eq!(em_min.value(0), 5.4e-7);
    assert_eq!(em_min.value(1), 6.9e-7);
    assert!(em_min.is_null(2));

    let release = batch.column_by_name("release").unwrap().as_string::<i32>();
    assert!(release.iter().all(|value| value == Some("PDR3")));
    let priority = batch
        .column_by_name("priority")
        .unwrap()
        .as_primitive::<arrow::datatypes::Int64Type>();
    assert!(priority.iter().all(|value| value == Some(5)));
}

/// Test CSV output with a header line
#[test]
fn test_csv_export() {
    let dir = tempdir().unwrap();
    let (config, repository) = write_inputs(dir.path());
    let path = dir.path().join("obscore.csv");

    let mut exporter = ObscoreExporter::new(&repository, config).unwrap();
    let stats = exporter.to_csv(&path).unwrap();
    assert_eq!(stats.rows_written, 4);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header[0], columns::DATAPRODUCT_TYPE);
    assert_eq!(header[29], columns::INSTRUMENT_NAME);
    assert_eq!(&header[30..], &["priority", "release"]);

    assert!(lines[1].starts_with("image,lsst.calexp,Subaru,2,COSMOS,HSC-0001228-049,HSC.PDR,"));
    assert!(lines[4].ends_with(",5,PDR3"));
}

/// Test that collection overrides restrict the export
#[test]
fn test_collection_override() {
    let dir = tempdir().unwrap();
    let (mut config, repository) = write_inputs(dir.path());
    config.collections = Some(vec!["HSC/raw/all".to_string()]);

    let mut exporter = ObscoreExporter::new(&repository, config).unwrap();
    let rows: usize = exporter
        .record_batches()
        .map(|batch| batch.unwrap().num_rows())
        .sum();
    assert_eq!(rows, 1);
}

/// Test that an export without matching datasets still writes the schema
#[test]
fn test_empty_export_writes_schema() {
    let dir = tempdir().unwrap();
    let (mut config, repository) = write_inputs(dir.path());
    config.collections = Some(vec!["does/not/exist".to_string()]);

    let parquet_path = dir.path().join("empty.parquet");
    let csv_path = dir.path().join("empty.csv");

    let mut exporter = ObscoreExporter::new(&repository, config).unwrap();
    assert_eq!(exporter.record_batches().count(), 0);

    let stats = exporter.to_parquet(&parquet_path).unwrap();
    assert_eq!(stats.rows_written, 0);
    assert_eq!(stats.batches_written, 0);

    let reader = SerializedFileReader::new(File::open(&parquet_path).unwrap()).unwrap();
    assert_eq!(reader.metadata().num_row_groups(), 0);
    assert_eq!(reader.metadata().file_metadata().num_rows(), 0);
    assert_eq!(reader.metadata().file_metadata().schema_descr().num_columns(), 32);

    exporter.to_csv(&csv_path).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with(columns::DATAPRODUCT_TYPE));
}

/// Test JSON configuration with a custom delimiter and no compression
#[test]
fn test_json_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("obscore.json");
    fs::write(
        &config_path,
        r#"{
            "facility_name": "Subaru",
            "csv_delimiter": ";",
            "parquet_compression": "uncompressed",
            "dataset_types": {"raw": {"dataproduct_type": "image", "calib_level": 1}}
        }"#,
    )
    .unwrap();
    let config = ExporterConfig::from_file(&config_path).unwrap();
    let repository = SnapshotRepository::from_json_str(REPOSITORY).unwrap();

    let path = dir.path().join("raw.csv");
    let mut exporter = ObscoreExporter::new(&repository, config).unwrap();
    exporter.to_csv(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].split(';').count(), 30);
    assert!(lines[1].starts_with("image;;Subaru;1;COSMOS;"));
}
