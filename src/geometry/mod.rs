//! # Spherical Geometry
//!
//! The small subset of spherical geometry needed to describe observation
//! footprints: points on the unit sphere, circles and convex polygons, plus
//! the bounding circle used for the ObsCore `s_ra`, `s_dec` and `s_fov`
//! columns.
//!
//! All angles exchanged with callers are in degrees.

mod region;
mod vector;

#[cfg(test)]
mod tests;

pub use region::{Circle, ConvexPolygon, GeometryError, Region};
pub use vector::{LonLat, UnitVector3d};
