//! Geographic positions and grid cell keys.

use crate::error::GeometryError;
use std::fmt;

/// Smallest representable latitude, in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Largest representable latitude, in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Smallest representable longitude, in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Largest representable longitude, in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A position on the map, in degrees.
///
/// Construction is unchecked so hosts can pass through whatever their
/// platform reports. Code that derives cell keys calls
/// [`validate`](LatLng::validate) first.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LatLng {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
}

impl LatLng {
    /// Create a position from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and inside the
    /// representable latitude/longitude bounds.
    pub fn validate(self) -> Result<Self, GeometryError> {
        let lat_ok = self.lat.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(self)
        } else {
            Err(GeometryError::PositionOutOfRange {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Arithmetic mean of a set of positions, or `None` if empty.
    ///
    /// Plain component-wise averaging; no antimeridian handling.
    pub fn centroid<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut n = 0usize;
        let (mut lat, mut lng) = (0.0, 0.0);
        for p in positions {
            lat += p.lat;
            lng += p.lng;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Self::new(lat / n as f64, lng / n as f64))
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Identifies one cell of the clustering grid.
///
/// A composite `(row, col)` key: rows count up from the south pole,
/// columns count east from the antimeridian. Keys are only meaningful
/// relative to the cell size they were encoded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Latitude band index.
    pub row: i64,
    /// Longitude band index.
    pub col: i64,
}

impl CellKey {
    /// Create a key from its row and column.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}
