//! Capability traits at the boundary between a clustering strategy and
//! its host map.
//!
//! The strategy consumes [`MapProvider`], [`MarkerHandle`], [`Marker`]
//! and [`Cluster`], and exposes [`ClusteringStrategy`] to the host
//! overlay framework.

use crate::error::{ClusterError, ProviderError};
use crate::geo::{CellKey, LatLng};
use crate::id::MarkerId;

/// Options for a provider-allocated marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerOptions {
    /// Where the marker is placed.
    pub position: LatLng,
    /// Whether the marker is displayed immediately.
    pub visible: bool,
    /// Icon hue in degrees, `[0, 360)`.
    pub hue: f32,
}

/// A marker owned by the map provider and driven directly by the
/// strategy, such as a cluster's representative pin.
pub trait MarkerHandle {
    /// Show or hide the marker.
    fn set_visible(&mut self, visible: bool);

    /// Whether the marker is currently displayed.
    fn is_visible(&self) -> bool;

    /// Move the marker.
    fn set_position(&mut self, position: LatLng);

    /// Current position of the marker.
    fn position(&self) -> LatLng;

    /// Remove the marker from the map.
    fn remove(self)
    where
        Self: Sized;
}

/// The host map, as seen by a clustering strategy.
pub trait MapProvider {
    /// Handle type for markers allocated by this provider.
    type Handle: MarkerHandle;

    /// Allocate a new marker on the map.
    fn add_marker(&mut self, options: &MarkerOptions) -> Result<Self::Handle, ProviderError>;

    /// The current camera zoom level.
    fn current_zoom(&self) -> f32;
}

/// A caller-owned marker tracked by a strategy.
///
/// Implementors are cheap handles (`Rc`, index into host storage, and
/// so on): the strategy clones them into its membership index and into
/// cluster member sets without taking ownership of the marker itself.
pub trait Marker: Clone {
    /// Stable identity of the marker.
    fn id(&self) -> MarkerId;

    /// Current position.
    fn position(&self) -> LatLng;

    /// Visibility requested by the caller, independent of clustering.
    fn desired_visible(&self) -> bool;

    /// Set the displayed state directly, bypassing cluster arbitration.
    fn force_display(&self, visible: bool);
}

/// One grid cell's worth of markers, represented on the map by a
/// single provider marker.
///
/// The strategy decides membership; the cluster decides what is shown.
pub trait Cluster<M: Marker>: Sized {
    /// Handle type of the representative marker.
    type Handle: MarkerHandle;

    /// Build an empty cluster for `cell` around a hidden representative.
    fn new(cell: CellKey, handle: Self::Handle) -> Self;

    /// The cell this cluster occupies.
    fn cell(&self) -> CellKey;

    /// Add a member. Display is not updated until
    /// [`refresh_display`](Cluster::refresh_display).
    fn add_member(&mut self, marker: M);

    /// Remove a member, returning it if it was present.
    fn remove_member(&mut self, id: MarkerId) -> Option<M>;

    /// Whether `id` is a member.
    fn contains(&self, id: MarkerId) -> bool;

    /// Number of members.
    fn member_count(&self) -> usize;

    /// `true` if the cluster has no members.
    fn is_empty(&self) -> bool {
        self.member_count() == 0
    }

    /// Recompute what is displayed from the members' desired visibility
    /// and positions.
    fn refresh_display(&mut self);

    /// Tear down the representative marker.
    fn release(self);
}

/// The host-facing surface of a clustering strategy.
///
/// The host overlay forwards marker and camera events here. Strategies
/// are interchangeable; the host holds whichever one is selected,
/// typically as `Box<dyn ClusteringStrategy<M>>`.
pub trait ClusteringStrategy<M: Marker> {
    /// Destroy all clusters and restore individual marker display.
    fn teardown(&mut self);

    /// The camera zoom changed.
    fn on_zoom_change(&mut self, zoom: f32) -> Result<(), ClusterError>;

    /// A marker was added to the overlay.
    fn on_add(&mut self, marker: M) -> Result<(), ClusterError>;

    /// A marker was removed from the overlay.
    fn on_remove(&mut self, marker: &M) -> Result<(), ClusterError>;

    /// A marker's position changed.
    fn on_position_change(&mut self, marker: &M) -> Result<(), ClusterError>;

    /// The caller asked for a marker to be shown or hidden.
    fn on_visibility_request(&mut self, marker: &M, visible: bool) -> Result<(), ClusterError>;
}
