//! Workload generators for markgrid benchmarks.
//!
//! - [`scattered_positions`]: uniform spread over the whole globe
//! - [`hub_positions`]: dense clumps around a handful of centres, the
//!   shape real marker sets tend to have

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use markgrid_core::LatLng;

/// Deterministic pseudo-random value in `[0, 1)` for index `i`.
fn unit(i: u64, mul: u64) -> f64 {
    (i.wrapping_mul(mul) >> 11) as f64 / (1u64 << 53) as f64
}

/// `n` positions spread over the globe, reproducible from `seed`.
pub fn scattered_positions(n: usize, seed: u64) -> Vec<LatLng> {
    (0..n as u64)
        .map(|i| {
            let k = i ^ seed;
            LatLng::new(
                unit(k, 6364136223846793007) * 180.0 - 90.0,
                unit(k, 1442695040888963407) * 360.0 - 180.0,
            )
        })
        .collect()
}

/// `n` positions clumped within `spread` degrees of `hubs` centres.
///
/// Centres are themselves scattered. Positions are clamped into the valid
/// range, so every result encodes.
pub fn hub_positions(n: usize, hubs: usize, spread: f64, seed: u64) -> Vec<LatLng> {
    let centres = scattered_positions(hubs.max(1), seed);
    (0..n as u64)
        .map(|i| {
            let k = i ^ seed.rotate_left(17);
            let c = centres[(k as usize) % centres.len()];
            let lat = c.lat + (unit(k, 2862933555777941757) - 0.5) * 2.0 * spread;
            let lng = c.lng + (unit(k, 3202034522624059733) - 0.5) * 2.0 * spread;
            LatLng::new(lat.clamp(-90.0, 90.0), lng.clamp(-180.0, 180.0))
        })
        .collect()
}
