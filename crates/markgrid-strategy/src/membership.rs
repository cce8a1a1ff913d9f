//! Marker to cluster membership index.

use indexmap::IndexMap;
use markgrid_core::{CellKey, ClusterError, Marker, MarkerId};

/// A tracked marker and the cell of the cluster holding it.
#[derive(Clone, Debug)]
pub struct Tracked<M> {
    /// The caller's marker handle.
    pub marker: M,
    /// Owning cluster's cell; `None` while clustering is disabled.
    pub cell: Option<CellKey>,
}

/// Every marker the strategy tracks, keyed by [`MarkerId`].
///
/// Membership is recorded as the owning cluster's [`CellKey`], never as
/// a reference to the cluster, so cluster lifetime stays with the
/// registry.
pub struct MembershipIndex<M> {
    entries: IndexMap<MarkerId, Tracked<M>>,
}

impl<M: Marker> MembershipIndex<M> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of tracked markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is tracked.
    pub fn contains(&self, id: MarkerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Fail with `AlreadyTracked` if `id` is tracked.
    pub fn ensure_untracked(&self, id: MarkerId) -> Result<(), ClusterError> {
        if self.contains(id) {
            return Err(ClusterError::AlreadyTracked { marker: id });
        }
        Ok(())
    }

    /// Look up a tracked marker.
    pub fn get(&self, id: MarkerId) -> Result<&Tracked<M>, ClusterError> {
        self.entries
            .get(&id)
            .ok_or(ClusterError::NotTracked { marker: id })
    }

    /// Start tracking `marker` in `cell`.
    pub fn insert(&mut self, marker: M, cell: Option<CellKey>) -> Result<(), ClusterError> {
        let id = marker.id();
        self.ensure_untracked(id)?;
        self.entries.insert(id, Tracked { marker, cell });
        Ok(())
    }

    /// Stop tracking `id`, returning its entry.
    pub fn remove(&mut self, id: MarkerId) -> Result<Tracked<M>, ClusterError> {
        self.entries
            .swap_remove(&id)
            .ok_or(ClusterError::NotTracked { marker: id })
    }

    /// Record that `id` now belongs to the cluster at `cell`.
    pub fn set_cell(&mut self, id: MarkerId, cell: Option<CellKey>) -> Result<(), ClusterError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(ClusterError::NotTracked { marker: id })?;
        entry.cell = cell;
        Ok(())
    }

    /// Detach every marker from its cluster.
    pub fn clear_cells(&mut self) {
        for entry in self.entries.values_mut() {
            entry.cell = None;
        }
    }

    /// Tracked markers in insertion order (modulo removals).
    pub fn iter(&self) -> impl Iterator<Item = &Tracked<M>> {
        self.entries.values()
    }
}

impl<M: Marker> Default for MembershipIndex<M> {
    fn default() -> Self {
        Self::new()
    }
}
