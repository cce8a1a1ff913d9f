//! Grid geometry for markgrid clustering.
//!
//! Two pieces of arithmetic sit underneath every clustering decision:
//!
//! - [`CellSizeCalculator`] maps a continuous camera zoom to a discrete
//!   [`Resolution`]: either [`Resolution::Disabled`] or an active grid with
//!   a [`CellSize`] that halves with every zoom level.
//! - [`encode`] maps a position and a cell size to a [`CellKey`].
//!
//! Both are pure functions of their inputs, so a key computed for a given
//! cell size stays valid for as long as that cell size is in effect.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod resolution;

#[cfg(test)]
pub(crate) mod compliance;

pub use cell::{bounds, encode};
pub use markgrid_core::CellKey;
pub use resolution::{CellSize, CellSizeCalculator, Resolution};
