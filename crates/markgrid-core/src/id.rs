//! Strongly-typed marker identifiers.

use std::fmt;

/// Identifies a marker tracked by a clustering strategy.
///
/// Assigned by the host. The strategy keys its membership index on this
/// value, so two live markers must never share an ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MarkerId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
