//! Strategy that never clusters.

use indexmap::IndexMap;
use log::debug;
use markgrid_core::{ClusterError, ClusteringStrategy, GeometryError, Marker, MarkerId};

/// Shows every marker individually, exactly as its caller asks.
///
/// Useful as a drop-in when clustering is switched off, and as a baseline
/// for comparing strategies. Tracking rules match the grid strategy, so
/// callers see the same `NotTracked` / `AlreadyTracked` errors.
pub struct PassthroughStrategy<M> {
    markers: IndexMap<MarkerId, M>,
}

impl<M: Marker> PassthroughStrategy<M> {
    /// Track `markers`, applying each one's desired visibility.
    pub fn new<I>(markers: I) -> Result<Self, ClusterError>
    where
        I: IntoIterator<Item = M>,
    {
        let mut strategy = Self {
            markers: IndexMap::new(),
        };
        for marker in markers {
            strategy.on_add(marker)?;
        }
        Ok(strategy)
    }

    /// Number of tracked markers.
    pub fn tracked_count(&self) -> usize {
        self.markers.len()
    }

    /// Whether `id` is tracked.
    pub fn is_tracked(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id)
    }

    fn ensure_tracked(&self, id: MarkerId) -> Result<(), ClusterError> {
        if self.markers.contains_key(&id) {
            Ok(())
        } else {
            Err(ClusterError::NotTracked { marker: id })
        }
    }
}

impl<M: Marker> ClusteringStrategy<M> for PassthroughStrategy<M> {
    fn teardown(&mut self) {
        for m in self.markers.values() {
            m.force_display(m.desired_visible());
        }
        debug!("passthrough teardown: {} markers", self.markers.len());
    }

    fn on_zoom_change(&mut self, zoom: f32) -> Result<(), ClusterError> {
        if !zoom.is_finite() {
            return Err(GeometryError::NonFiniteZoom { zoom }.into());
        }
        Ok(())
    }

    fn on_add(&mut self, marker: M) -> Result<(), ClusterError> {
        let id = marker.id();
        if self.markers.contains_key(&id) {
            return Err(ClusterError::AlreadyTracked { marker: id });
        }
        marker.force_display(marker.desired_visible());
        self.markers.insert(id, marker);
        Ok(())
    }

    fn on_remove(&mut self, marker: &M) -> Result<(), ClusterError> {
        let id = marker.id();
        self.markers
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(ClusterError::NotTracked { marker: id })
    }

    fn on_position_change(&mut self, marker: &M) -> Result<(), ClusterError> {
        self.ensure_tracked(marker.id())
    }

    fn on_visibility_request(&mut self, marker: &M, visible: bool) -> Result<(), ClusterError> {
        self.ensure_tracked(marker.id())?;
        marker.force_display(visible);
        Ok(())
    }
}
