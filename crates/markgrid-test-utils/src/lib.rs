//! Test utilities and mock types for markgrid development.
//!
//! Provides mock implementations of the capability traits
//! ([`MapProvider`], [`MarkerHandle`], [`Marker`]) backed by shared,
//! inspectable state, plus a [`RecordingCluster`] fixture in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use markgrid_core::{
    CellKey, LatLng, MapProvider, Marker, MarkerHandle, MarkerId, MarkerOptions, ProviderError,
};

pub use fixtures::RecordingCluster;

/// Identity of a handle allocated by a [`MockMap`], unique per map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Something the mock map observed.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// A marker was allocated through [`MapProvider::add_marker`].
    Added {
        handle: HandleId,
        options: MarkerOptions,
    },
    /// A handle was removed from the map.
    Removed { handle: HandleId },
    /// A cluster reported a display refresh (see [`RecordingCluster`]).
    Refreshed { cell: CellKey },
}

#[derive(Debug)]
struct HandleState {
    id: HandleId,
    visible: bool,
    position: LatLng,
    removed: bool,
}

#[derive(Debug, Default)]
struct MapState {
    zoom: f32,
    journal: Vec<MapEvent>,
    handles: Vec<Rc<RefCell<HandleState>>>,
    allocations_left: Option<usize>,
    next_handle: u64,
}

/// Mock implementation of [`MapProvider`].
///
/// Cloning shares the underlying state, so a test can hand one clone to
/// the strategy and keep another for assertions.
#[derive(Clone, Debug, Default)]
pub struct MockMap {
    state: Rc<RefCell<MapState>>,
}

impl MockMap {
    /// Create a map whose camera sits at `zoom`.
    pub fn new(zoom: f32) -> Self {
        let map = Self::default();
        map.state.borrow_mut().zoom = zoom;
        map
    }

    /// Change the reported camera zoom.
    pub fn set_zoom(&self, zoom: f32) {
        self.state.borrow_mut().zoom = zoom;
    }

    /// Allow `n` more successful allocations, then fail every call.
    pub fn fail_after(&self, n: usize) {
        self.state.borrow_mut().allocations_left = Some(n);
    }

    /// Snapshot of everything observed so far.
    pub fn journal(&self) -> Vec<MapEvent> {
        self.state.borrow().journal.clone()
    }

    /// Forget the journal, keeping handle state.
    pub fn clear_journal(&self) {
        self.state.borrow_mut().journal.clear();
    }

    /// Cells refreshed since the journal was last cleared, in order.
    pub fn refreshes(&self) -> Vec<CellKey> {
        self.state
            .borrow()
            .journal
            .iter()
            .filter_map(|e| match e {
                MapEvent::Refreshed { cell } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Number of allocations since the journal was last cleared.
    pub fn added_count(&self) -> usize {
        self.state
            .borrow()
            .journal
            .iter()
            .filter(|e| matches!(e, MapEvent::Added { .. }))
            .count()
    }

    /// Number of handles allocated and not yet removed.
    pub fn live_handles(&self) -> usize {
        self.state
            .borrow()
            .handles
            .iter()
            .filter(|h| !h.borrow().removed)
            .count()
    }

    /// Positions of live handles that are currently displayed.
    pub fn visible_handles(&self) -> Vec<LatLng> {
        self.state
            .borrow()
            .handles
            .iter()
            .filter_map(|h| {
                let h = h.borrow();
                (!h.removed && h.visible).then_some(h.position)
            })
            .collect()
    }
}

impl MapProvider for MockMap {
    type Handle = MockHandle;

    fn add_marker(&mut self, options: &MarkerOptions) -> Result<MockHandle, ProviderError> {
        let mut state = self.state.borrow_mut();
        if let Some(left) = state.allocations_left.as_mut() {
            if *left == 0 {
                return Err(ProviderError::new("mock allocation budget exhausted"));
            }
            *left -= 1;
        }
        let id = HandleId(state.next_handle);
        state.next_handle += 1;
        let handle = Rc::new(RefCell::new(HandleState {
            id,
            visible: options.visible,
            position: options.position,
            removed: false,
        }));
        state.handles.push(Rc::clone(&handle));
        state.journal.push(MapEvent::Added {
            handle: id,
            options: *options,
        });
        Ok(MockHandle {
            state: handle,
            map: Rc::clone(&self.state),
        })
    }

    fn current_zoom(&self) -> f32 {
        self.state.borrow().zoom
    }
}

/// Mock implementation of [`MarkerHandle`] allocated by [`MockMap`].
#[derive(Debug)]
pub struct MockHandle {
    state: Rc<RefCell<HandleState>>,
    map: Rc<RefCell<MapState>>,
}

impl MockHandle {
    /// Identity assigned at allocation.
    pub fn id(&self) -> HandleId {
        self.state.borrow().id
    }

    /// Record a cluster refresh in the owning map's journal.
    pub fn record_refresh(&self, cell: CellKey) {
        self.map
            .borrow_mut()
            .journal
            .push(MapEvent::Refreshed { cell });
    }
}

impl MarkerHandle for MockHandle {
    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    fn set_position(&mut self, position: LatLng) {
        self.state.borrow_mut().position = position;
    }

    fn position(&self) -> LatLng {
        self.state.borrow().position
    }

    fn remove(self) {
        let id = {
            let mut s = self.state.borrow_mut();
            s.removed = true;
            s.visible = false;
            s.id
        };
        self.map
            .borrow_mut()
            .journal
            .push(MapEvent::Removed { handle: id });
    }
}

#[derive(Debug)]
struct MarkerState {
    id: MarkerId,
    position: Cell<LatLng>,
    desired: Cell<bool>,
    displayed: Cell<bool>,
    forced: Cell<usize>,
}

/// Mock implementation of [`Marker`].
///
/// A shared handle: clones observe the same position, desired
/// visibility and displayed state.
#[derive(Clone, Debug)]
pub struct MockMarker {
    state: Rc<MarkerState>,
}

impl MockMarker {
    /// A desired-visible marker at `(lat, lng)`, not yet displayed.
    pub fn new(id: u64, lat: f64, lng: f64) -> Self {
        Self::with_visibility(id, lat, lng, true)
    }

    /// A desired-hidden marker at `(lat, lng)`.
    pub fn hidden(id: u64, lat: f64, lng: f64) -> Self {
        Self::with_visibility(id, lat, lng, false)
    }

    fn with_visibility(id: u64, lat: f64, lng: f64, desired: bool) -> Self {
        Self {
            state: Rc::new(MarkerState {
                id: MarkerId(id),
                position: Cell::new(LatLng::new(lat, lng)),
                desired: Cell::new(desired),
                displayed: Cell::new(false),
                forced: Cell::new(0),
            }),
        }
    }

    /// Move the marker. Callers report the move to the strategy themselves.
    pub fn set_position(&self, lat: f64, lng: f64) {
        self.state.position.set(LatLng::new(lat, lng));
    }

    /// Change the caller-requested visibility.
    pub fn set_desired_visible(&self, visible: bool) {
        self.state.desired.set(visible);
    }

    /// The displayed state last set through [`Marker::force_display`].
    pub fn displayed(&self) -> bool {
        self.state.displayed.get()
    }

    /// How many times [`Marker::force_display`] was called.
    pub fn force_count(&self) -> usize {
        self.state.forced.get()
    }
}

impl Marker for MockMarker {
    fn id(&self) -> MarkerId {
        self.state.id
    }

    fn position(&self) -> LatLng {
        self.state.position.get()
    }

    fn desired_visible(&self) -> bool {
        self.state.desired.get()
    }

    fn force_display(&self, visible: bool) {
        self.state.displayed.set(visible);
        self.state.forced.set(self.state.forced.get() + 1);
    }
}
