//! Reusable cluster test fixture.
//!
//! [`RecordingCluster`] journals every `refresh_display` call into the
//! owning [`MockMap`](crate::MockMap), so tests can assert exactly which
//! clusters were refreshed and in what order.
//!
//! Its display policy is deliberately blunt: the representative is shown
//! whenever any member is desired-visible, and members are never shown
//! individually.

use indexmap::IndexMap;
use markgrid_core::{CellKey, Cluster, LatLng, Marker, MarkerHandle, MarkerId};

use crate::MockHandle;

pub struct RecordingCluster<M> {
    cell: CellKey,
    handle: MockHandle,
    members: IndexMap<MarkerId, M>,
}

impl<M: Marker> RecordingCluster<M> {
    /// Whether the representative marker is displayed.
    pub fn representative_visible(&self) -> bool {
        self.handle.is_visible()
    }

    /// Member IDs in insertion order.
    pub fn member_ids(&self) -> Vec<MarkerId> {
        self.members.keys().copied().collect()
    }
}

impl<M: Marker> Cluster<M> for RecordingCluster<M> {
    type Handle = MockHandle;

    fn new(cell: CellKey, handle: MockHandle) -> Self {
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
        self.handle.record_refresh(self.cell);
        let visible: Vec<LatLng> = self
            .members
            .values()
            .filter(|m| m.desired_visible())
            .map(|m| m.position())
            .collect();
        for m in self.members.values() {
            m.force_display(false);
        }
        match LatLng::centroid(visible) {
            Some(center) => {
                self.handle.set_position(center);
                self.handle.set_visible(true);
            }
            None => self.handle.set_visible(false),
        }
    }

    fn release(self) {
        self.handle.remove();
    }
}
