//! Integration test: end-to-end clustering scenarios against a mock map.
//!
//! Each test drives a [`GridClusteringStrategy`] through the same events a
//! host map would report and checks what ends up on screen.
//!
//! The config used throughout has `zoom_offset = 0.5` and
//! `base_divisor = 1`, so zoom 0 yields 1° cells, zoom -1 yields 2° cells
//! and any zoom above 0.5 disables clustering.

use markgrid_core::{Cluster, ClusterError, ClusteringStrategy, Marker, MarkerId};
use markgrid_grid::Resolution;
use markgrid_strategy::{GridClusteringStrategy, GridConfig, PassthroughStrategy};
use markgrid_test_utils::{MapEvent, MockMap, MockMarker, RecordingCluster};

type Grid = GridClusteringStrategy<MockMap, MockMarker>;
type Recorded = GridClusteringStrategy<MockMap, MockMarker, RecordingCluster<MockMarker>>;

fn degree_config() -> GridConfig {
    GridConfig {
        zoom_offset: 0.5,
        base_divisor: 1.0,
        ..GridConfig::default()
    }
}

// ── One-degree grid ─────────────────────────────────────────────────

#[test]
fn one_degree_grid_walkthrough() {
    let map = MockMap::new(0.0);
    let mut grid = Grid::new(map.clone(), degree_config(), Vec::new()).unwrap();
    let a = MockMarker::new(1, 0.0, 0.0);
    let b = MockMarker::new(2, 0.5, 0.5);

    grid.on_add(a.clone()).unwrap();
    grid.on_add(b.clone()).unwrap();
    assert_eq!(grid.cluster_count(), 1);
    let origin = grid.cluster_of(MarkerId(1)).unwrap();
    assert_eq!(grid.cluster(origin).unwrap().member_count(), 2);
    // Two wanted markers in one cell collapse into the representative.
    assert!(!a.displayed() && !b.displayed());
    assert_eq!(map.visible_handles().len(), 1);

    b.set_position(10.0, 10.0);
    grid.on_position_change(&b).unwrap();
    assert_eq!(grid.cluster_count(), 2);
    assert_eq!(grid.cluster(origin).unwrap().member_count(), 1);
    // Each now stands alone.
    assert!(a.displayed() && b.displayed());
    assert!(map.visible_handles().is_empty());

    a.set_position(20.0, 20.0);
    grid.on_position_change(&a).unwrap();
    assert!(grid.cluster(origin).is_none());
    assert_eq!(grid.cluster_count(), 2);
    assert_eq!(map.live_handles(), 2);
}

// ── Disabled transition ─────────────────────────────────────────────

#[test]
fn zooming_past_threshold_shows_every_wanted_marker() {
    let map = MockMap::new(0.0);
    let markers: Vec<MockMarker> = (0..5)
        .map(|i| MockMarker::new(i, 0.1 * i as f64, 0.1 * i as f64))
        .chain(std::iter::once(MockMarker::hidden(9, 0.2, 0.2)))
        .collect();
    let mut grid = Grid::new(map.clone(), degree_config(), markers.clone()).unwrap();
    assert_eq!(grid.cluster_count(), 1);

    grid.on_zoom_change(3.0).unwrap();
    assert_eq!(grid.grid_state(), Resolution::Disabled);
    assert_eq!(grid.cluster_count(), 0);
    assert_eq!(map.live_handles(), 0);
    for m in &markers {
        assert_eq!(m.displayed(), m.desired_visible(), "marker {}", m.id());
    }

    grid.on_zoom_change(0.0).unwrap();
    assert_eq!(grid.cluster_count(), 1);
    assert_eq!(map.visible_handles().len(), 1);
}

// ── Visibility arbitration ──────────────────────────────────────────

#[test]
fn visibility_is_arbitrated_by_cluster() {
    let map = MockMap::new(0.0);
    let mut grid = Recorded::new(map.clone(), degree_config(), Vec::new()).unwrap();
    let a = MockMarker::hidden(1, 0.0, 0.0);
    let b = MockMarker::new(2, 0.3, 0.3);
    grid.on_add(a.clone()).unwrap();
    grid.on_add(b.clone()).unwrap();
    let cell = grid.cluster_of(MarkerId(1)).unwrap();
    map.clear_journal();

    a.set_desired_visible(true);
    grid.on_visibility_request(&a, true).unwrap();

    assert_eq!(map.journal(), vec![MapEvent::Refreshed { cell }]);
    assert!(!a.displayed());
}

// ── Round trips ─────────────────────────────────────────────────────

#[test]
fn add_remove_round_trip_leaves_no_trace() {
    let map = MockMap::new(0.0);
    let mut grid = Grid::new(map.clone(), degree_config(), Vec::new()).unwrap();
    let markers: Vec<MockMarker> = (0..20)
        .map(|i| MockMarker::new(i, (i % 7) as f64 * 3.0, (i % 5) as f64 * 4.0))
        .collect();
    for m in &markers {
        grid.on_add(m.clone()).unwrap();
    }
    assert!(grid.cluster_count() > 1);
    for m in markers.iter().rev() {
        grid.on_remove(m).unwrap();
    }
    assert_eq!(grid.cluster_count(), 0);
    assert_eq!(grid.tracked_count(), 0);
    assert_eq!(map.live_handles(), 0);
}

#[test]
fn zoom_within_resolution_touches_nothing() {
    let map = MockMap::new(0.0);
    let mut grid = Recorded::new(
        map.clone(),
        degree_config(),
        vec![MockMarker::new(1, 0.0, 0.0), MockMarker::new(2, 5.0, 5.0)],
    )
    .unwrap();
    map.clear_journal();
    for zoom in [0.1, 0.2, 0.49, -0.49] {
        grid.on_zoom_change(zoom).unwrap();
    }
    assert!(map.journal().is_empty());
}

// ── Regressions ─────────────────────────────────────────────────────

#[test]
fn move_refreshes_destination_cluster() {
    let map = MockMap::new(0.0);
    let mut grid = Recorded::new(map.clone(), degree_config(), Vec::new()).unwrap();
    let a = MockMarker::new(1, 0.0, 0.0);
    grid.on_add(a.clone()).unwrap();
    map.clear_journal();

    a.set_position(30.0, 30.0);
    grid.on_position_change(&a).unwrap();

    let dest = grid.cluster_of(MarkerId(1)).unwrap();
    assert_eq!(map.refreshes(), vec![dest]);
}

#[test]
fn antimeridian_neighbours_are_separate_cells() {
    let map = MockMap::new(0.0);
    let mut grid = Grid::new(map, degree_config(), Vec::new()).unwrap();
    grid.on_add(MockMarker::new(1, 0.0, 179.9)).unwrap();
    grid.on_add(MockMarker::new(2, 0.0, -179.9)).unwrap();
    assert_eq!(grid.cluster_count(), 2);
}

// ── Teardown ────────────────────────────────────────────────────────

#[test]
fn teardown_then_reuse() {
    let map = MockMap::new(0.0);
    let a = MockMarker::new(1, 0.0, 0.0);
    let b = MockMarker::new(2, 0.1, 0.1);
    let mut grid = Grid::new(map.clone(), degree_config(), vec![a.clone(), b.clone()]).unwrap();
    assert!(!a.displayed());

    grid.teardown();
    assert!(a.displayed() && b.displayed());
    assert_eq!(map.live_handles(), 0);

    // Torn down means disabled; the next active zoom rebuilds.
    grid.on_zoom_change(-1.0).unwrap();
    assert_eq!(grid.cluster_count(), 1);
    assert!(!a.displayed());
}

#[test]
fn strategies_are_interchangeable() {
    fn drive<S: ClusteringStrategy<MockMarker>>(s: &mut S, m: &MockMarker) -> Result<(), ClusterError> {
        s.on_add(m.clone())?;
        s.on_zoom_change(0.0)?;
        s.on_visibility_request(m, true)?;
        s.on_remove(m)
    }

    let m = MockMarker::new(1, 1.0, 1.0);
    let mut grid = Grid::new(MockMap::new(0.0), degree_config(), Vec::new()).unwrap();
    let mut pass: PassthroughStrategy<MockMarker> = PassthroughStrategy::new(Vec::new()).unwrap();
    drive(&mut grid, &m).unwrap();
    drive(&mut pass, &m).unwrap();
    assert_eq!(grid.tracked_count(), 0);
    assert_eq!(pass.tracked_count(), 0);
}
