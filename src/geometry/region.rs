use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector::{LonLat, UnitVector3d};

/// Errors constructing spherical regions
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeometryError {
    /// Polygon with fewer than three vertices
    #[error("Convex polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Circle radius outside [0, 180] degrees
    #[error("Circle opening angle must be within [0, 180] degrees, got {0}")]
    InvalidOpeningAngle(f64),
}

/// Circle on the unit sphere: all points within `opening_angle` of `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleRepr", into = "CircleRepr")]
pub struct Circle {
    center: UnitVector3d,
    opening_angle: f64,
}

impl Circle {
    /// Create a circle, opening angle in degrees.
    pub fn new(center: UnitVector3d, opening_angle: f64) -> Result<Self, GeometryError> {
        if !(0.0..=180.0).contains(&opening_angle) {
            return Err(GeometryError::InvalidOpeningAngle(opening_angle));
        }
        Ok(Self {
            center,
            opening_angle,
        })
    }

    /// Circle covering the whole sphere.
    pub fn full() -> Self {
        Self {
            center: UnitVector3d::z_axis(),
            opening_angle: 180.0,
        }
    }

    /// Center of the circle
    pub fn center(&self) -> UnitVector3d {
        self.center
    }

    /// Opening angle (angular radius) in degrees
    pub fn opening_angle(&self) -> f64 {
        self.opening_angle
    }

    /// True if the point lies inside or on the circle (with a small tolerance).
    pub fn contains(&self, point: &UnitVector3d) -> bool {
        self.center.angle_to(point) <= self.opening_angle + 1e-9
    }
}

#[derive(Serialize, Deserialize)]
struct CircleRepr {
    center: LonLat,
    radius: f64,
}

impl TryFrom<CircleRepr> for Circle {
    type Error = GeometryError;

    fn try_from(repr: CircleRepr) -> Result<Self, Self::Error> {
        Circle::new(UnitVector3d::from(repr.center), repr.radius)
    }
}

impl From<Circle> for CircleRepr {
    fn from(circle: Circle) -> Self {
        CircleRepr {
            center: LonLat::from(circle.center),
            radius: circle.opening_angle,
        }
    }
}

/// Convex polygon on the unit sphere with great-circle edges.
///
/// Vertices are kept in the order they were given; convexity is not
/// verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRepr", into = "PolygonRepr")]
pub struct ConvexPolygon {
    vertices: Vec<UnitVector3d>,
}

impl ConvexPolygon {
    /// Create a polygon from its vertices.
    pub fn new(vertices: Vec<UnitVector3d>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }

    /// Create a polygon from (longitude, latitude) pairs in degrees.
    pub fn from_degrees(points: &[(f64, f64)]) -> Result<Self, GeometryError> {
        let vertices = points
            .iter()
            .map(|&(lon, lat)| UnitVector3d::from(LonLat::from_degrees(lon, lat)))
            .collect();
        Self::new(vertices)
    }

    /// Polygon vertices
    pub fn vertices(&self) -> &[UnitVector3d] {
        &self.vertices
    }

    /// Circle centered on the vertex centroid that contains every vertex.
    ///
    /// Degenerates to the full sphere when the centroid is at the origin.
    pub fn bounding_circle(&self) -> Circle {
        let (sx, sy, sz) = self
            .vertices
            .iter()
            .fold((0.0, 0.0, 0.0), |(x, y, z), v| (x + v.x(), y + v.y(), z + v.z()));

        let Some(center) = UnitVector3d::normalize(sx, sy, sz) else {
            return Circle::full();
        };

        let radius = self
            .vertices
            .iter()
            .map(|v| center.angle_to(v))
            .fold(0.0_f64, f64::max);

        Circle {
            center,
            opening_angle: radius.min(180.0),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PolygonRepr {
    vertices: Vec<LonLat>,
}

impl TryFrom<PolygonRepr> for ConvexPolygon {
    type Error = GeometryError;

    fn try_from(repr: PolygonRepr) -> Result<Self, Self::Error> {
        ConvexPolygon::new(repr.vertices.into_iter().map(UnitVector3d::from).collect())
    }
}

impl From<ConvexPolygon> for PolygonRepr {
    fn from(polygon: ConvexPolygon) -> Self {
        PolygonRepr {
            vertices: polygon.vertices.into_iter().map(LonLat::from).collect(),
        }
    }
}

/// Region on the celestial sphere attached to a data ID or dimension record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    /// Convex polygon
    ConvexPolygon(ConvexPolygon),
    /// Circle
    Circle(Circle),
}

impl Region {
    /// Bounding circle of the region
    pub fn bounding_circle(&self) -> Circle {
        match self {
            Region::ConvexPolygon(polygon) => polygon.bounding_circle(),
            Region::Circle(circle) => circle.clone(),
        }
    }

    /// Name of the region shape
    pub fn shape_name(&self) -> &'static str {
        match self {
            Region::ConvexPolygon(_) => "ConvexPolygon",
            Region::Circle(_) => "Circle",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let circle = self.bounding_circle();
        let center = LonLat::from(circle.center());
        write!(
            f,
            "{}(center=({:.4}, {:.4}), radius={:.4})",
            self.shape_name(),
            center.lon,
            center.lat,
            circle.opening_angle()
        )
    }
}

impl From<ConvexPolygon> for Region {
    fn from(polygon: ConvexPolygon) -> Self {
        Region::ConvexPolygon(polygon)
    }
}

impl From<Circle> for Region {
    fn from(circle: Circle) -> Self {
        Region::Circle(circle)
    }
}
