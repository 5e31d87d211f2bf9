use std::fmt::Write;

use log::warn;

use crate::geometry::{LonLat, Region};
use crate::schema::columns;

use super::row::Row;

/// Fill the spatial columns from a sky region.
///
/// The bounding circle gives `s_ra`, `s_dec` and `s_fov` (its diameter).
/// `s_region` is only produced for convex polygons; other shapes are logged
/// and leave it null.
pub fn region_to_columns(region: Option<&Region>, row: &mut Row) {
    let Some(region) = region else {
        return;
    };

    let circle = region.bounding_circle();
    let center = LonLat::from(circle.center());
    row.set(columns::S_RA, center.lon);
    row.set(columns::S_DEC, center.lat);
    row.set(columns::S_FOV, circle.opening_angle() * 2.0);

    match region {
        Region::ConvexPolygon(polygon) => {
            let mut s_region = String::from("POLYGON ICRS");
            for vertex in polygon.vertices() {
                let point = LonLat::from(*vertex);
                // writing to a String cannot fail
                let _ = write!(
                    s_region,
                    " {:.6} {:.6}",
                    clamp_zero(point.lon),
                    clamp_zero(point.lat)
                );
            }
            row.set(columns::S_REGION, s_region);
        }
        other => {
            warn!("Unexpected region type: {}", other.shape_name());
        }
    }
}

// Rounding noise around zero would otherwise print as "-0.000000".
fn clamp_zero(value: f64) -> f64 {
    if value.abs() < 5e-7 {
        0.0
    } else {
        value
    }
}
