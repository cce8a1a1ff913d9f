//! Encoder compliance test helpers.
//!
//! These functions verify that cell encoding satisfies the invariants
//! clustering relies on at a given cell size. Reused across the
//! resolution and cell test modules.

use crate::cell::{bounds, encode};
use crate::resolution::CellSize;
use indexmap::IndexSet;
use markgrid_core::{CellKey, LatLng};

/// A deterministic spread of positions covering poles, antimeridian and
/// the interior.
pub fn sample_positions() -> Vec<LatLng> {
    let mut out = Vec::new();
    for i in 0u64..200 {
        let lat = (i.wrapping_mul(6364136223846793007) % 18_001) as f64 / 100.0 - 90.0;
        let lng = (i.wrapping_mul(1442695040888963407) % 36_001) as f64 / 100.0 - 180.0;
        out.push(LatLng::new(lat, lng));
    }
    out.extend([
        LatLng::new(-90.0, -180.0),
        LatLng::new(90.0, 180.0),
        LatLng::new(0.0, 0.0),
        LatLng::new(-0.0, -0.0),
    ]);
    out
}

/// Assert that encoding the same position twice gives the same key.
pub fn assert_encode_idempotent(cell_size: CellSize) {
    for p in sample_positions() {
        let a = encode(p, cell_size).expect("sample position should encode");
        let b = encode(p, cell_size).expect("sample position should encode");
        assert_eq!(a, b, "encode({p}) is non-deterministic at {cell_size}");
    }
}

/// Assert that every position lies inside the bounds of its own cell.
pub fn assert_position_within_cell(cell_size: CellSize) {
    let eps = 1e-9;
    for p in sample_positions() {
        let key = encode(p, cell_size).expect("sample position should encode");
        let (sw, ne) = bounds(key, cell_size);
        assert!(
            sw.lat <= p.lat + eps && p.lat <= ne.lat + eps,
            "{p} outside latitude band of {key}: [{}, {}]",
            sw.lat,
            ne.lat
        );
        assert!(
            sw.lng <= p.lng + eps && p.lng <= ne.lng + eps,
            "{p} outside longitude band of {key}: [{}, {}]",
            sw.lng,
            ne.lng
        );
    }
}

/// Assert that keys are non-negative, since positions are shifted into
/// the non-negative quadrant before division.
pub fn assert_keys_non_negative(cell_size: CellSize) {
    for p in sample_positions() {
        let key = encode(p, cell_size).expect("sample position should encode");
        assert!(key.row >= 0 && key.col >= 0, "{p} encoded to {key}");
    }
}

/// Assert that the south-west corner of every sampled cell encodes back
/// to that cell, allowing one band of rounding slack below it.
pub fn assert_corner_maps_back(cell_size: CellSize) {
    let positions = sample_positions();
    let keys: IndexSet<CellKey> = positions
        .iter()
        .map(|&p| encode(p, cell_size).expect("sample position should encode"))
        .collect();
    for key in &keys {
        let (sw, _) = bounds(*key, cell_size);
        let corner = encode(
            LatLng::new(sw.lat.max(-90.0), sw.lng.max(-180.0)),
            cell_size,
        );
        if let Ok(corner) = corner {
            assert!(
                key.row - corner.row <= 1 && corner.row <= key.row,
                "south-west corner of {key} encoded to {corner}"
            );
            assert!(
                key.col - corner.col <= 1 && corner.col <= key.col,
                "south-west corner of {key} encoded to {corner}"
            );
        }
    }
}

/// Run all encoder compliance checks at `cell_size`.
pub fn run_full_compliance(cell_size: CellSize) {
    assert_encode_idempotent(cell_size);
    assert_position_within_cell(cell_size);
    assert_keys_non_negative(cell_size);
    assert_corner_maps_back(cell_size);
}
