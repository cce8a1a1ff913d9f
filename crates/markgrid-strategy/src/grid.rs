//! Grid clustering strategy.
//!
//! [`GridClusteringStrategy`] partitions the map into square cells whose
//! size follows the camera zoom, and keeps one cluster per occupied cell.
//! Single-marker events are handled incrementally; only a change of
//! [`Resolution`] triggers a full rebuild.
//!
//! # Invariants
//!
//! After every operation returns:
//!
//! - Disabled: no cluster exists and no tracked marker has a cell.
//! - Active: every tracked marker is a member of exactly the cluster at
//!   its recorded cell, and every cluster in the registry has at least
//!   one member.
//!
//! Every operation validates its inputs before it mutates anything, so
//! an `Err` leaves the strategy as it was. The exception is a provider
//! failure in the middle of a rebuild, which drops the strategy to the
//! disabled state (see [`on_zoom_change`](ClusteringStrategy::on_zoom_change)).

use log::{debug, warn};
use markgrid_core::{CellKey, Cluster, ClusterError, ClusteringStrategy, MapProvider, Marker, MarkerId};
use markgrid_grid::{encode, CellSize, CellSizeCalculator, Resolution};

use crate::cluster::ClusterMarker;
use crate::config::{ConfigError, GridConfig};
use crate::membership::MembershipIndex;
use crate::registry::ClusterRegistry;

/// Clusters markers by the grid cell their position falls into.
///
/// `C` is the cluster implementation; it defaults to [`ClusterMarker`].
/// The strategy owns the map provider `P` and clones marker handles `M`
/// into its membership index.
///
/// # Examples
///
/// ```
/// use markgrid_core::ClusteringStrategy;
/// use markgrid_strategy::{GridClusteringStrategy, GridConfig};
/// use markgrid_test_utils::{MockMap, MockMarker};
///
/// let map = MockMap::new(3.0);
/// let mut grid: GridClusteringStrategy<MockMap, MockMarker> =
///     GridClusteringStrategy::new(map.clone(), GridConfig::default(), Vec::new()).unwrap();
///
/// grid.on_add(MockMarker::new(1, 48.85, 2.35)).unwrap();
/// grid.on_add(MockMarker::new(2, 48.86, 2.34)).unwrap();
/// assert_eq!(grid.cluster_count(), 1);
/// assert_eq!(map.visible_handles().len(), 1);
/// ```
pub struct GridClusteringStrategy<P: MapProvider, M, C = ClusterMarker<M, <P as MapProvider>::Handle>> {
    provider: P,
    calculator: CellSizeCalculator,
    resolution: Resolution,
    registry: ClusterRegistry<M, C>,
    membership: MembershipIndex<M>,
}

impl<P, M, C> GridClusteringStrategy<P, M, C>
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    /// Build a strategy over `provider`, tracking `markers`.
    ///
    /// Reads the provider's current zoom once, then places every initial
    /// marker through a full rebuild.
    pub fn new<I>(provider: P, config: GridConfig, markers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = M>,
    {
        config.validate()?;
        let calculator = config.calculator();
        let resolution = calculator
            .resolution(provider.current_zoom())
            .map_err(ClusterError::from)?;
        let mut membership = MembershipIndex::new();
        for marker in markers {
            marker.position().validate().map_err(ClusterError::from)?;
            membership.insert(marker, None)?;
        }
        let mut strategy = Self {
            provider,
            calculator,
            resolution: Resolution::Disabled,
            registry: ClusterRegistry::new(config.cluster_hue),
            membership,
        };
        strategy.rebuild(resolution)?;
        debug!(
            "grid strategy ready: {} markers, {}",
            strategy.membership.len(),
            strategy.resolution
        );
        Ok(strategy)
    }

    /// The resolution currently in effect.
    pub fn grid_state(&self) -> Resolution {
        self.resolution
    }

    /// Number of live clusters.
    pub fn cluster_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of tracked markers.
    pub fn tracked_count(&self) -> usize {
        self.membership.len()
    }

    /// Whether `id` is tracked.
    pub fn is_tracked(&self, id: MarkerId) -> bool {
        self.membership.contains(id)
    }

    /// Cell of the cluster holding `id`; `None` if untracked or disabled.
    pub fn cluster_of(&self, id: MarkerId) -> Option<CellKey> {
        self.membership.get(id).ok().and_then(|t| t.cell)
    }

    /// The cluster at `cell`, if any.
    pub fn cluster(&self, cell: CellKey) -> Option<&C> {
        self.registry.get(cell)
    }

    /// All live clusters.
    pub fn clusters(&self) -> impl Iterator<Item = &C> {
        self.registry.iter()
    }

    /// Tracked markers with their current cell.
    pub fn markers(&self) -> impl Iterator<Item = (&M, Option<CellKey>)> {
        self.membership.iter().map(|t| (&t.marker, t.cell))
    }

    /// The map provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the map provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    fn active_cell_size(&self) -> Option<CellSize> {
        self.resolution.cell_size()
    }

    fn not_tracked(id: MarkerId) -> ClusterError {
        warn!("marker {id} reported but not tracked");
        ClusterError::NotTracked { marker: id }
    }

    /// Remove `id` from the cluster at `cell`; destroy the cluster if that
    /// emptied it, refresh it otherwise.
    fn detach(&mut self, id: MarkerId, cell: CellKey) {
        if let Some(cluster) = self.registry.get_mut(cell) {
            cluster.remove_member(id);
        }
        if !self.registry.destroy_if_empty(cell) {
            self.registry.refresh(cell);
        }
    }

    /// Two-pass rebuild at `resolution`.
    ///
    /// All positions are encoded before anything is torn down, so a
    /// geometry error leaves the current state intact. Clusters are fully
    /// populated before any of them is refreshed.
    fn rebuild(&mut self, resolution: Resolution) -> Result<(), ClusterError> {
        let placements = match resolution.cell_size() {
            Some(cell_size) => Some(
                self.membership
                    .iter()
                    .map(|t| {
                        let position = t.marker.position();
                        encode(position, cell_size).map(|cell| (t.marker.clone(), cell))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        // Pass 1: tear down.
        let destroyed = self.registry.drain();
        self.membership.clear_cells();
        self.resolution = resolution;

        // Pass 2: repopulate.
        let Some(placements) = placements else {
            for t in self.membership.iter() {
                t.marker.force_display(t.marker.desired_visible());
            }
            debug!(
                "rebuild: clustering disabled, {destroyed} clusters destroyed, {} markers shown individually",
                self.membership.len()
            );
            return Ok(());
        };

        for (marker, cell) in placements {
            let id = marker.id();
            let position = marker.position();
            let cluster = match self
                .registry
                .find_or_create(cell, position, &mut self.provider)
            {
                Ok(cluster) => cluster,
                Err(e) => {
                    warn!("rebuild aborted, falling back to disabled: {e}");
                    self.fall_back_to_disabled();
                    return Err(e.into());
                }
            };
            cluster.add_member(marker);
            self.membership.set_cell(id, Some(cell))?;
        }
        self.registry.refresh_all();
        debug!(
            "rebuild: {}, {destroyed} clusters destroyed, {} created for {} markers",
            self.resolution,
            self.registry.len(),
            self.membership.len()
        );
        Ok(())
    }

    fn fall_back_to_disabled(&mut self) {
        self.registry.drain();
        self.membership.clear_cells();
        self.resolution = Resolution::Disabled;
        for t in self.membership.iter() {
            t.marker.force_display(t.marker.desired_visible());
        }
    }
}

impl<P, M, C> ClusteringStrategy<M> for GridClusteringStrategy<P, M, C>
where
    P: MapProvider,
    M: Marker,
    C: Cluster<M, Handle = P::Handle>,
{
    fn teardown(&mut self) {
        let destroyed = self.registry.drain();
        self.membership.clear_cells();
        self.resolution = Resolution::Disabled;
        for t in self.membership.iter() {
            if t.marker.desired_visible() {
                t.marker.force_display(true);
            }
        }
        debug!(
            "teardown: {destroyed} clusters destroyed, {} markers restored",
            self.membership.len()
        );
    }

    /// Recompute the resolution for `zoom` and rebuild if it changed.
    ///
    /// If the provider fails while the rebuild is placing clusters, the
    /// strategy drops to the disabled state (every marker shown per its
    /// own desired visibility) and returns the error. The next zoom
    /// change with an active resolution retries the rebuild.
    fn on_zoom_change(&mut self, zoom: f32) -> Result<(), ClusterError> {
        let resolution = self.calculator.resolution(zoom)?;
        if resolution == self.resolution {
            return Ok(());
        }
        debug!("zoom {zoom}: {} -> {resolution}", self.resolution);
        self.rebuild(resolution)
    }

    fn on_add(&mut self, marker: M) -> Result<(), ClusterError> {
        self.membership.ensure_untracked(marker.id())?;
        let position = marker.position().validate()?;
        let Some(cell_size) = self.active_cell_size() else {
            marker.force_display(marker.desired_visible());
            return self.membership.insert(marker, None);
        };

        let cell = encode(position, cell_size)?;
        let cluster = self
            .registry
            .find_or_create(cell, position, &mut self.provider)?;
        cluster.add_member(marker.clone());
        if marker.desired_visible() {
            cluster.refresh_display();
        }
        self.membership.insert(marker, Some(cell))
    }

    fn on_remove(&mut self, marker: &M) -> Result<(), ClusterError> {
        let id = marker.id();
        let tracked = self
            .membership
            .remove(id)
            .map_err(|_| Self::not_tracked(id))?;
        if let Some(cell) = tracked.cell {
            self.detach(id, cell);
        }
        Ok(())
    }

    fn on_position_change(&mut self, marker: &M) -> Result<(), ClusterError> {
        let id = marker.id();
        let old_cell = self
            .membership
            .get(id)
            .map_err(|_| Self::not_tracked(id))?
            .cell;
        // Checked even while disabled so a bad position cannot block the
        // next rebuild.
        let position = marker.position().validate()?;
        let (Some(cell_size), Some(old_cell)) = (self.active_cell_size(), old_cell) else {
            return Ok(());
        };

        let new_cell = encode(position, cell_size)?;
        let wanted = marker.desired_visible();
        if new_cell == old_cell {
            if wanted {
                self.registry.refresh(old_cell);
            }
            return Ok(());
        }

        // Attach first so a provider failure leaves membership untouched.
        self.registry
            .find_or_create(new_cell, position, &mut self.provider)?
            .add_member(marker.clone());
        self.membership.set_cell(id, Some(new_cell))?;
        self.detach(id, old_cell);
        if wanted {
            self.registry.refresh(new_cell);
        }
        Ok(())
    }

    fn on_visibility_request(&mut self, marker: &M, visible: bool) -> Result<(), ClusterError> {
        let id = marker.id();
        let cell = self
            .membership
            .get(id)
            .map_err(|_| Self::not_tracked(id))?
            .cell;
        match cell {
            Some(cell) => self.registry.refresh(cell),
            None => marker.force_display(visible),
        }
        Ok(())
    }
}
