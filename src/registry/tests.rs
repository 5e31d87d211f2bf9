use super::*;
use chrono::{TimeZone, Utc};

const SNAPSHOT: &str = r#"{
    "datasets": [
        {"id": "d1", "dataset_type": "calexp", "run": "runs/a",
         "data_id": {
            "values": {"instrument": "HSC", "visit": 1228, "band": "r"},
            "timespan": {"begin": "2021-01-01T00:00:00Z", "end": "2021-01-01T00:00:30Z"},
            "region": {"type": "circle", "center": {"lon": 10.0, "lat": 20.0}, "radius": 0.5}
         },
         "uri": "file:///repo/calexp/d1.fits"},
        {"id": "d2", "dataset_type": "calexp", "run": "runs/b",
         "data_id": {"values": {"instrument": "HSC", "visit": 1230}}},
        {"id": "d3", "dataset_type": "raw", "run": "runs/a",
         "data_id": {
            "values": {"instrument": "HSC", "exposure": 77},
            "exposure": {"instrument": "HSC", "id": 77, "group_id": 1228, "exposure_time": 30.0}
         }}
    ],
    "visits": [
        {"instrument": "HSC", "id": 1228, "exposure_time": 30.0, "target_name": "COSMOS"}
    ]
}"#;

fn collect(repo: &SnapshotRepository, dataset_type: &str, query: &DatasetQuery) -> Vec<DatasetRef> {
    repo.query_datasets(dataset_type, query)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_mjd_conversion() {
    let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(to_mjd(&epoch), 40_587.0);

    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    assert!((to_mjd(&j2000) - 51_544.5).abs() < 1e-9);
}

#[test]
fn test_unbounded_timespan() {
    let timespan = Timespan {
        begin: Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()),
        end: None,
    };
    assert!(timespan.begin_mjd().is_some());
    assert!(timespan.end_mjd().is_none());
}

#[test]
fn test_snapshot_query_by_type() {
    let repo = SnapshotRepository::from_json_str(SNAPSHOT).unwrap();
    assert_eq!(repo.len(), 3);

    let refs = collect(&repo, "calexp", &DatasetQuery::default());
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].id, "d1");

    let data_id = &refs[0].data_id;
    assert_eq!(data_id.get("band"), Some(&DimensionValue::Str("r".to_string())));
    assert_eq!(data_id.get("visit"), Some(&DimensionValue::Int(1228)));
    assert!(data_id.region().is_some());
    assert!(data_id.timespan().is_some());

    assert!(collect(&repo, "deepCoadd", &DatasetQuery::default()).is_empty());
}

#[test]
fn test_snapshot_collection_filter() {
    let repo = SnapshotRepository::from_json_str(SNAPSHOT).unwrap();
    let query = DatasetQuery {
        collections: Some(vec!["runs/b".to_string()]),
        where_clause: None,
    };

    let refs = collect(&repo, "calexp", &query);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].id, "d2");
}

#[test]
fn test_snapshot_rejects_where() {
    let repo = SnapshotRepository::from_json_str(SNAPSHOT).unwrap();
    let query = DatasetQuery {
        collections: None,
        where_clause: Some("visit > 100".to_string()),
    };

    assert!(matches!(
        repo.query_datasets("calexp", &query),
        Err(RegistryError::UnsupportedQuery(_))
    ));
}

#[test]
fn test_snapshot_uri() {
    let repo = SnapshotRepository::from_json_str(SNAPSHOT).unwrap();
    let refs = collect(&repo, "calexp", &DatasetQuery::default());

    assert_eq!(repo.dataset_uri(&refs[0]).unwrap(), "file:///repo/calexp/d1.fits");
    assert!(matches!(
        repo.dataset_uri(&refs[1]),
        Err(RegistryError::FileNotFound(_))
    ));
}

#[test]
fn test_snapshot_records() {
    let repo = SnapshotRepository::from_json_str(SNAPSHOT).unwrap();

    let raw = collect(&repo, "raw", &DatasetQuery::default());
    let exposure = raw[0].data_id.exposure().unwrap();
    assert_eq!(exposure.group_id, 1228);
    assert_eq!(exposure.exposure_time, Some(30.0));
    assert!(exposure.target_name.is_none());

    let visits = repo.query_visits().unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].target_name.as_deref(), Some("COSMOS"));
}

#[test]
fn test_data_coordinate_display() {
    let data_id = DataCoordinate::new()
        .with_value("instrument", "HSC")
        .with_value("visit", 1228_i64);
    assert_eq!(data_id.to_string(), "{instrument: HSC, visit: 1228}");
}
