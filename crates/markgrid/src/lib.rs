//! Markgrid: zoom-aware grid clustering of map markers.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! markgrid sub-crates. For most users, adding `markgrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use markgrid::prelude::*;
//! use markgrid_test_utils::{MockMap, MockMarker};
//!
//! // A host map at zoom 4 and three markers, two of them close together.
//! let map = MockMap::new(4.0);
//! let markers = vec![
//!     MockMarker::new(1, 51.50, -0.12),
//!     MockMarker::new(2, 51.51, -0.13),
//!     MockMarker::new(3, -33.87, 151.21),
//! ];
//!
//! let mut grid: GridClusteringStrategy<MockMap, MockMarker> =
//!     GridClusteringStrategy::new(map.clone(), GridConfig::default(), markers).unwrap();
//! assert_eq!(grid.cluster_count(), 2);
//!
//! // Zoomed all the way in, every marker is shown on its own.
//! grid.on_zoom_change(24.0).unwrap();
//! assert_eq!(grid.grid_state(), Resolution::Disabled);
//! assert_eq!(map.live_handles(), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `markgrid-core` | IDs, positions, errors, capability traits |
//! | [`grid`] | `markgrid-grid` | Zoom to cell size, position to cell key |
//! | [`strategy`] | `markgrid-strategy` | Grid and passthrough strategies, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`markgrid-core`).
///
/// Contains [`types::LatLng`], [`types::CellKey`], the error types, and the
/// traits a host map implements ([`types::MapProvider`],
/// [`types::MarkerHandle`], [`types::Marker`]).
pub use markgrid_core as types;

/// Grid arithmetic (`markgrid-grid`).
///
/// [`grid::CellSizeCalculator`] and [`grid::encode`] are pure functions
/// usable without any strategy.
pub use markgrid_grid as grid;

/// Clustering strategies (`markgrid-strategy`).
pub use markgrid_strategy as strategy;

/// Common imports for typical markgrid usage.
///
/// ```rust
/// use markgrid::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use markgrid_core::{
        CellKey, Cluster, ClusteringStrategy, LatLng, MapProvider, Marker, MarkerHandle, MarkerId,
        MarkerOptions,
    };

    // Errors
    pub use markgrid_core::{ClusterError, GeometryError, ProviderError};

    // Grid
    pub use markgrid_grid::{CellSize, Resolution};

    // Strategies
    pub use markgrid_strategy::{
        ConfigError, GridClusteringStrategy, GridConfig, PassthroughStrategy,
    };
}
