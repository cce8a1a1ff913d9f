//! Marker clustering strategies for markgrid.
//!
//! [`GridClusteringStrategy`] buckets markers into square grid cells whose
//! size follows the camera zoom, showing one representative pin per
//! crowded cell. [`PassthroughStrategy`] does no clustering at all.
//!
//! Both implement [`ClusteringStrategy`], so a host map can swap one for
//! the other without changing how it reports events.
//!
//! # Building blocks
//!
//! - [`ClusterRegistry`]: the live clusters, keyed by [`CellKey`].
//! - [`MembershipIndex`]: every tracked marker and the cell it is filed under.
//! - [`ClusterMarker`]: the reference [`Cluster`] display policy.
//! - [`GridConfig`]: tuning, validated once at construction.
//!
//! [`CellKey`]: markgrid_core::CellKey
//! [`Cluster`]: markgrid_core::Cluster
//! [`ClusteringStrategy`]: markgrid_core::ClusteringStrategy

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod grid;
pub mod membership;
pub mod passthrough;
pub mod registry;

#[cfg(test)]
pub(crate) mod compliance;

pub use cluster::ClusterMarker;
pub use config::{ConfigError, GridConfig};
pub use grid::GridClusteringStrategy;
pub use membership::{MembershipIndex, Tracked};
pub use passthrough::PassthroughStrategy;
pub use registry::ClusterRegistry;
