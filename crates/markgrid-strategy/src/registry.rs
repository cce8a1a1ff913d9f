//! Cell-keyed cluster registry.
//!
//! [`ClusterRegistry`] owns every live cluster. Its
//! [`find_or_create`](ClusterRegistry::find_or_create),
//! [`destroy_if_empty`](ClusterRegistry::destroy_if_empty) and
//! [`drain`](ClusterRegistry::drain) are the only places clusters come
//! into or go out of existence.

use std::marker::PhantomData;

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::trace;
use markgrid_core::{CellKey, Cluster, LatLng, MapProvider, Marker, MarkerOptions, ProviderError};

/// Map from grid cell to the cluster occupying it.
///
/// Iteration follows creation order, which keeps rebuild refreshes and
/// provider allocations deterministic for a given event sequence.
pub struct ClusterRegistry<M, C> {
    clusters: IndexMap<CellKey, C>,
    hue: f32,
    _marker: PhantomData<fn() -> M>,
}

impl<M: Marker, C: Cluster<M>> ClusterRegistry<M, C> {
    /// Create an empty registry whose representative markers use `hue`.
    pub fn new(hue: f32) -> Self {
        Self {
            clusters: IndexMap::new(),
            hue,
            _marker: PhantomData,
        }
    }

    /// Number of live clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// `true` if no cluster exists.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The cluster at `cell`, if any.
    pub fn get(&self, cell: CellKey) -> Option<&C> {
        self.clusters.get(&cell)
    }

    /// Mutable access to the cluster at `cell`, if any.
    pub fn get_mut(&mut self, cell: CellKey) -> Option<&mut C> {
        self.clusters.get_mut(&cell)
    }

    /// All live clusters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.clusters.values()
    }

    /// Return the cluster at `cell`, allocating one if the cell is empty.
    ///
    /// A new cluster gets a hidden representative marker at `position`.
    /// Provider failures leave the registry unchanged.
    pub fn find_or_create<P>(
        &mut self,
        cell: CellKey,
        position: LatLng,
        provider: &mut P,
    ) -> Result<&mut C, ProviderError>
    where
        P: MapProvider<Handle = <C as Cluster<M>>::Handle>,
    {
        match self.clusters.entry(cell) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let handle = provider.add_marker(&MarkerOptions {
                    position,
                    visible: false,
                    hue: self.hue,
                })?;
                trace!("cluster created at cell {cell}");
                Ok(e.insert(C::new(cell, handle)))
            }
        }
    }

    /// Destroy the cluster at `cell` if it has no members.
    ///
    /// Returns `true` if a cluster was destroyed.
    pub fn destroy_if_empty(&mut self, cell: CellKey) -> bool {
        if !self.clusters.get(&cell).is_some_and(|c| c.is_empty()) {
            return false;
        }
        match self.clusters.swap_remove(&cell) {
            Some(cluster) => {
                cluster.release();
                trace!("cluster destroyed at cell {cell}");
                true
            }
            None => false,
        }
    }

    /// Ask the cluster at `cell` to refresh its display. No-op if absent.
    pub fn refresh(&mut self, cell: CellKey) {
        if let Some(cluster) = self.clusters.get_mut(&cell) {
            cluster.refresh_display();
        }
    }

    /// Refresh every cluster, in creation order.
    pub fn refresh_all(&mut self) {
        for cluster in self.clusters.values_mut() {
            cluster.refresh_display();
        }
    }

    /// Release and remove every cluster, returning how many there were.
    pub fn drain(&mut self) -> usize {
        let n = self.clusters.len();
        for (_, cluster) in self.clusters.drain(..) {
            cluster.release();
        }
        n
    }
}
