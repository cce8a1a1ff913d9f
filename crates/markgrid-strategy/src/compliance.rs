//! Strategy invariant checks.
//!
//! Called after every step of the strategy tests, unit and property
//! based alike, so a violation is reported at the event that caused it.

use markgrid_core::{Cluster, MapProvider, Marker};
use markgrid_grid::encode;

use crate::grid::GridClusteringStrategy;

/// Assert that no cluster exists while clustering is disabled, and that
/// no marker claims one.
pub fn assert_disabled_is_empty<P, M, C>(g: &GridClusteringStrategy<P, M, C>)
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    if g.grid_state().is_active() {
        return;
    }
    assert_eq!(g.cluster_count(), 0, "clusters alive while disabled");
    for (m, cell) in g.markers() {
        assert_eq!(cell, None, "marker {} has a cell while disabled", m.id());
    }
}

/// Assert that every tracked marker sits in exactly the cluster at its
/// recorded cell, and that this cell matches its current position.
pub fn assert_membership_partition<P, M, C>(g: &GridClusteringStrategy<P, M, C>)
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    let Some(cell_size) = g.grid_state().cell_size() else {
        return;
    };
    for (m, cell) in g.markers() {
        let cell = cell.unwrap_or_else(|| panic!("marker {} has no cluster", m.id()));
        let expected = encode(m.position(), cell_size).expect("tracked position should encode");
        assert_eq!(cell, expected, "marker {} is filed under a stale cell", m.id());
        let holders = g.clusters().filter(|c| c.contains(m.id())).count();
        assert_eq!(holders, 1, "marker {} is in {holders} clusters", m.id());
        assert!(
            g.cluster(cell).is_some_and(|c| c.contains(m.id())),
            "cluster at {cell} does not hold marker {}",
            m.id()
        );
    }
    let members: usize = g.clusters().map(|c| c.member_count()).sum();
    assert_eq!(members, g.tracked_count(), "clusters hold untracked markers");
}

/// Assert that no cluster is empty and each sits under its own key.
pub fn assert_no_empty_clusters<P, M, C>(g: &GridClusteringStrategy<P, M, C>)
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    for c in g.clusters() {
        assert!(!c.is_empty(), "empty cluster at {}", c.cell());
        assert!(
            g.cluster(c.cell()).is_some_and(|found| std::ptr::eq(found, c)),
            "cluster at {} is filed under another key",
            c.cell()
        );
    }
}

/// Run all strategy invariant checks.
pub fn run_full_compliance<P, M, C>(g: &GridClusteringStrategy<P, M, C>)
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    assert_disabled_is_empty(g);
    assert_membership_partition(g);
    assert_no_empty_clusters(g);
}
