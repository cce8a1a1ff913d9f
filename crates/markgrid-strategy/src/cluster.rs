//! Reference [`Cluster`] implementation.
//!
//! [`ClusterMarker`] arbitrates display from its members' desired
//! visibility:
//!
//! | desired-visible members | shown                                      |
//! |-------------------------|--------------------------------------------|
//! | 0                       | nothing                                    |
//! | 1                       | that member, representative hidden         |
//! | 2 or more               | representative at their centroid, members hidden |
//!
//! Desired-hidden members are always hidden.

use indexmap::IndexMap;
use markgrid_core::{CellKey, Cluster, LatLng, Marker, MarkerHandle, MarkerId};
use smallvec::SmallVec;

/// A grid cell's markers, shown either individually or as one pin.
pub struct ClusterMarker<M, H> {
    cell: CellKey,
    handle: H,
    members: IndexMap<MarkerId, M>,
}

impl<M: Marker, H: MarkerHandle> ClusterMarker<M, H> {
    /// The representative marker.
    pub fn representative(&self) -> &H {
        &self.handle
    }

    /// Members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &M> {
        self.members.values()
    }
}

impl<M: Marker, H: MarkerHandle> Cluster<M> for ClusterMarker<M, H> {
    type Handle = H;

    fn new(cell: CellKey, handle: H) -> Self {
        Self {
            cell,
            handle,
            members: IndexMap::new(),
        }
    }

    fn cell(&self) -> CellKey {
        self.cell
    }

    fn add_member(&mut self, marker: M) {
        self.members.insert(marker.id(), marker);
    }

    fn remove_member(&mut self, id: MarkerId) -> Option<M> {
        self.members.shift_remove(&id)
    }

    fn contains(&self, id: MarkerId) -> bool {
        self.members.contains_key(&id)
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }

    fn refresh_display(&mut self) {
        // Most cells hold a handful of markers.
        let wanted: SmallVec<[&M; 8]> = self
            .members
            .values()
            .filter(|m| m.desired_visible())
            .collect();

        match wanted.as_slice() {
            [] => {
                self.handle.set_visible(false);
                for m in self.members.values() {
                    m.force_display(false);
                }
            }
            [single] => {
                let shown = single.id();
                self.handle.set_visible(false);
                for m in self.members.values() {
                    m.force_display(m.id() == shown);
                }
            }
            many => {
                let center = LatLng::centroid(many.iter().map(|m| m.position()));
                for m in self.members.values() {
                    m.force_display(false);
                }
                if let Some(center) = center {
                    self.handle.set_position(center);
                }
                self.handle.set_visible(true);
            }
        }
    }

    fn release(self) {
        self.handle.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markgrid_core::{MapProvider, MarkerOptions};
    use markgrid_test_utils::{MockHandle, MockMap, MockMarker};

    fn cluster(map: &mut MockMap) -> ClusterMarker<MockMarker, MockHandle> {
        let handle = map
            .add_marker(&MarkerOptions {
                position: LatLng::new(0.0, 0.0),
                visible: false,
                hue: 180.0,
            })
            .unwrap();
        ClusterMarker::new(CellKey::new(0, 0), handle)
    }

    #[test]
    fn no_wanted_members_shows_nothing() {
        let mut map = MockMap::new(10.0);
        let mut c = cluster(&mut map);
        let a = MockMarker::hidden(1, 0.1, 0.1);
        c.add_member(a.clone());
        c.refresh_display();
        assert!(!c.representative().is_visible());
        assert!(!a.displayed());
    }

    #[test]
    fn single_wanted_member_shown_alone() {
        let mut map = MockMap::new(10.0);
        let mut c = cluster(&mut map);
        let a = MockMarker::new(1, 0.1, 0.1);
        let b = MockMarker::hidden(2, 0.2, 0.2);
        c.add_member(a.clone());
        c.add_member(b.clone());
        c.refresh_display();
        assert!(a.displayed());
        assert!(!b.displayed());
        assert!(!c.representative().is_visible());
    }

    #[test]
    fn many_wanted_members_collapse_to_centroid() {
        let mut map = MockMap::new(10.0);
        let mut c = cluster(&mut map);
        let a = MockMarker::new(1, 0.0, 0.0);
        let b = MockMarker::new(2, 0.4, 0.8);
        let hidden = MockMarker::hidden(3, 0.9, 0.9);
        for m in [&a, &b, &hidden] {
            c.add_member(m.clone());
        }
        c.refresh_display();
        assert!(!a.displayed() && !b.displayed() && !hidden.displayed());
        assert!(c.representative().is_visible());
        assert_eq!(c.representative().position(), LatLng::new(0.2, 0.4));
        assert_eq!(map.visible_handles(), vec![LatLng::new(0.2, 0.4)]);
    }

    #[test]
    fn dropping_to_one_member_restores_individual_display() {
        let mut map = MockMap::new(10.0);
        let mut c = cluster(&mut map);
        let a = MockMarker::new(1, 0.0, 0.0);
        let b = MockMarker::new(2, 0.5, 0.5);
        c.add_member(a.clone());
        c.add_member(b.clone());
        c.refresh_display();
        assert!(c.representative().is_visible());

        assert!(c.remove_member(b.id()).is_some());
        c.refresh_display();
        assert!(a.displayed());
        assert!(!c.representative().is_visible());
    }

    #[test]
    fn membership_bookkeeping() {
        let mut map = MockMap::new(10.0);
        let mut c = cluster(&mut map);
        assert!(c.is_empty());
        c.add_member(MockMarker::new(7, 0.0, 0.0));
        c.add_member(MockMarker::new(7, 0.0, 0.0));
        assert_eq!(c.member_count(), 1);
        assert!(c.contains(MarkerId(7)));
        assert!(c.remove_member(MarkerId(8)).is_none());
        assert_eq!(c.members().count(), 1);
    }

    #[test]
    fn release_removes_representative() {
        let mut map = MockMap::new(10.0);
        let c = cluster(&mut map);
        assert_eq!(map.live_handles(), 1);
        c.release();
        assert_eq!(map.live_handles(), 0);
    }
}
