use serde::{Deserialize, Serialize};

/// Point on the unit sphere as a Cartesian unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector3d {
    x: f64,
    y: f64,
    z: f64,
}

impl UnitVector3d {
    /// Normalize an arbitrary non-zero vector, `None` for (near) zero vectors.
    pub fn normalize(x: f64, y: f64, z: f64) -> Option<Self> {
        let norm = (x * x + y * y + z * z).sqrt();
        if norm < f64::EPSILON || !norm.is_finite() {
            return None;
        }
        Some(Self {
            x: x / norm,
            y: y / norm,
            z: z / norm,
        })
    }

    /// The north pole, (0, 0, 1).
    pub fn z_axis() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 1.0,
        }
    }

    /// X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angle to another point, in degrees.
    ///
    /// Uses atan2 of the cross and dot products, which stays accurate for
    /// nearly identical and nearly antipodal points.
    pub fn angle_to(&self, other: &Self) -> f64 {
        let cx = self.y * other.z - self.z * other.y;
        let cy = self.z * other.x - self.x * other.z;
        let cz = self.x * other.y - self.y * other.x;
        let cross = (cx * cx + cy * cy + cz * cz).sqrt();
        cross.atan2(self.dot(other)).to_degrees()
    }
}

impl From<LonLat> for UnitVector3d {
    fn from(lon_lat: LonLat) -> Self {
        let lon = lon_lat.lon.to_radians();
        let lat = lon_lat.lat.to_radians();
        Self {
            x: lat.cos() * lon.cos(),
            y: lat.cos() * lon.sin(),
            z: lat.sin(),
        }
    }
}

/// Longitude/latitude pair in degrees.
///
/// Longitude of a point converted from a vector is in [0, 360), latitude in
/// [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    /// Longitude (right ascension) in degrees
    pub lon: f64,
    /// Latitude (declination) in degrees
    pub lat: f64,
}

impl LonLat {
    /// Create from degrees
    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<UnitVector3d> for LonLat {
    fn from(v: UnitVector3d) -> Self {
        let mut lon = v.y.atan2(v.x).to_degrees();
        if lon < 0.0 {
            lon += 360.0;
        }
        // atan2 rounding can land exactly on the upper bound
        if lon >= 360.0 {
            lon -= 360.0;
        }
        let lat = v.z.atan2(v.x.hypot(v.y)).to_degrees();
        // avoid printing "-0.000000"
        Self {
            lon: lon + 0.0,
            lat: lat + 0.0,
        }
    }
}
