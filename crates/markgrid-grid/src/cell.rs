//! Position to grid cell encoding.
//!
//! Latitude and longitude are shifted into non-negative ranges, divided
//! by the cell size and floored to row/column indices. The key keeps row
//! and column as separate `i64`s, so it cannot collide however fine the
//! grid gets.

use crate::resolution::CellSize;
use markgrid_core::geo::{MIN_LATITUDE, MIN_LONGITUDE};
use markgrid_core::{CellKey, GeometryError, LatLng};

/// Encode `position` into the cell it occupies at `cell_size`.
///
/// Returns `Err(GeometryError::PositionOutOfRange)` for positions that
/// fail [`LatLng::validate`], and `Err(GeometryError::CellIndexOverflow)`
/// if the cell size is so small that an index leaves the `i64` range.
///
/// # Examples
///
/// ```
/// use markgrid_grid::{encode, CellSize};
/// use markgrid_core::LatLng;
///
/// let size = CellSize::new(1.0).unwrap();
/// let a = encode(LatLng::new(0.0, 0.0), size).unwrap();
/// let b = encode(LatLng::new(0.5, 0.5), size).unwrap();
/// assert_eq!(a, b);
/// assert_eq!((a.row, a.col), (90, 180));
/// ```
pub fn encode(position: LatLng, cell_size: CellSize) -> Result<CellKey, GeometryError> {
    let p = position.validate()?;
    let row = band_index(p.lat - MIN_LATITUDE, cell_size)?;
    let col = band_index(p.lng - MIN_LONGITUDE, cell_size)?;
    Ok(CellKey::new(row, col))
}

/// South-west and north-east corners of `cell` at `cell_size`.
///
/// Corners are not clamped: the top row and last column may extend past
/// the map bounds when the cell size does not divide them evenly.
pub fn bounds(cell: CellKey, cell_size: CellSize) -> (LatLng, LatLng) {
    let size = cell_size.degrees();
    let south = MIN_LATITUDE + cell.row as f64 * size;
    let west = MIN_LONGITUDE + cell.col as f64 * size;
    (
        LatLng::new(south, west),
        LatLng::new(south + size, west + size),
    )
}

fn band_index(offset: f64, cell_size: CellSize) -> Result<i64, GeometryError> {
    let q = (offset / cell_size.degrees()).floor();
    // i64::MAX rounds up to 2^63 as f64, so `>=` rejects everything that
    // would saturate in the cast below.
    if !q.is_finite() || q >= i64::MAX as f64 {
        return Err(GeometryError::CellIndexOverflow { value: q });
    }
    Ok(q as i64)
}
