//! Core types and traits for markgrid marker clustering.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the markgrid workspace:
//! identifiers, geographic positions, error types, and the capability
//! traits through which a clustering strategy talks to its host map.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geo;
pub mod id;
pub mod traits;

pub use error::{ClusterError, GeometryError, ProviderError};
pub use geo::{CellKey, LatLng};
pub use id::MarkerId;
pub use traits::{Cluster, ClusteringStrategy, MapProvider, Marker, MarkerHandle, MarkerOptions};
