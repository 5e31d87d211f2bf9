use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_lon_lat_roundtrip() {
    let original = LonLat::from_degrees(123.25, -45.5);
    let restored = LonLat::from(UnitVector3d::from(original));
    assert_close(restored.lon, 123.25);
    assert_close(restored.lat, -45.5);
}

#[test]
fn test_negative_longitude_normalized() {
    let restored = LonLat::from(UnitVector3d::from(LonLat::from_degrees(-10.0, 5.0)));
    assert_close(restored.lon, 350.0);
}

#[test]
fn test_angle_between_points() {
    let a = UnitVector3d::from(LonLat::from_degrees(0.0, 0.0));
    let b = UnitVector3d::from(LonLat::from_degrees(90.0, 0.0));
    assert_close(a.angle_to(&b), 90.0);
    assert_close(a.angle_to(&a), 0.0);
}

#[test]
fn test_normalize_zero_vector() {
    assert!(UnitVector3d::normalize(0.0, 0.0, 0.0).is_none());
}

#[test]
fn test_polygon_bounding_circle_contains_vertices() {
    let polygon =
        ConvexPolygon::from_degrees(&[(10.0, -1.0), (11.0, -1.0), (11.0, 1.0), (10.0, 1.0)])
            .unwrap();
    let circle = polygon.bounding_circle();

    for vertex in polygon.vertices() {
        assert!(circle.contains(vertex));
    }

    let center = LonLat::from(circle.center());
    assert!((center.lon - 10.5).abs() < 1e-6);
    assert!(center.lat.abs() < 1e-6);
    // half diagonal of a ~1x2 degree box
    assert!(circle.opening_angle() > 1.0 && circle.opening_angle() < 1.2);
}

#[test]
fn test_polygon_needs_three_vertices() {
    let result = ConvexPolygon::from_degrees(&[(0.0, 0.0), (1.0, 0.0)]);
    assert_eq!(result, Err(GeometryError::TooFewVertices(2)));
}

#[test]
fn test_circle_rejects_bad_radius() {
    let center = UnitVector3d::z_axis();
    assert!(Circle::new(center, 181.0).is_err());
    assert!(Circle::new(center, -1.0).is_err());
    assert!(Circle::new(center, 0.5).is_ok());
}

#[test]
fn test_region_json() {
    let json = r#"{"type": "convex_polygon", "vertices": [
        {"lon": 0.0, "lat": 0.0}, {"lon": 10.0, "lat": 0.0}, {"lon": 0.0, "lat": 10.0}
    ]}"#;
    let region: Region = serde_json::from_str(json).unwrap();
    assert_eq!(region.shape_name(), "ConvexPolygon");

    let json = r#"{"type": "circle", "center": {"lon": 45.0, "lat": 30.0}, "radius": 0.25}"#;
    let region: Region = serde_json::from_str(json).unwrap();
    let circle = region.bounding_circle();
    assert_close(circle.opening_angle(), 0.25);
}

#[test]
fn test_region_json_invalid_polygon() {
    let json = r#"{"type": "convex_polygon", "vertices": [{"lon": 0.0, "lat": 0.0}]}"#;
    assert!(serde_json::from_str::<Region>(json).is_err());
}
