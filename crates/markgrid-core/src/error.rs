//! Error types for markgrid clustering.
//!
//! Two local failure families, organized the way callers react to them:
//! state desynchronization between host and strategy (`NotTracked`,
//! `AlreadyTracked`) and geometry that cannot be mapped onto the grid
//! ([`GeometryError`]). Map-provider failures are carried through
//! unchanged as [`ProviderError`].

use crate::id::MarkerId;
use std::error::Error;
use std::fmt;

/// Errors from geometry that cannot be placed on the clustering grid.
///
/// Surfaced rather than clamped so the cell-key space is never
/// silently corrupted.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryError {
    /// A position is non-finite or outside latitude/longitude bounds.
    PositionOutOfRange {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },
    /// The reported zoom level is NaN or infinite.
    NonFiniteZoom {
        /// The invalid value.
        zoom: f32,
    },
    /// A computed cell size is non-finite, zero, or negative.
    InvalidCellSize {
        /// The invalid value.
        value: f64,
    },
    /// A row or column index does not fit the key range.
    CellIndexOverflow {
        /// The quotient that overflowed.
        value: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange { lat, lng } => {
                write!(f, "position ({lat}, {lng}) outside [-90, 90] x [-180, 180]")
            }
            Self::NonFiniteZoom { zoom } => write!(f, "zoom must be finite, got {zoom}"),
            Self::InvalidCellSize { value } => {
                write!(f, "cell size must be finite and positive, got {value}")
            }
            Self::CellIndexOverflow { value } => {
                write!(f, "cell index {value} exceeds the i64 key range")
            }
        }
    }
}

impl Error for GeometryError {}

/// A failure reported by the host map provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderError {
    /// Human-readable description supplied by the provider.
    pub reason: String,
}

impl ProviderError {
    /// Wrap a provider failure description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map provider failed: {}", self.reason)
    }
}

impl Error for ProviderError {}

/// Errors returned by clustering strategy operations.
///
/// A returned error means the operation made no change to the
/// strategy's registry or membership index.
#[derive(Clone, Debug, PartialEq)]
pub enum ClusterError {
    /// The marker was never added, or was already removed.
    NotTracked {
        /// The unknown marker.
        marker: MarkerId,
    },
    /// The marker is already tracked; adding it again would duplicate it.
    AlreadyTracked {
        /// The duplicate marker.
        marker: MarkerId,
    },
    /// A position or zoom level cannot be mapped onto the grid.
    InvalidGeometry(GeometryError),
    /// The map provider failed to allocate a representative marker.
    Provider(ProviderError),
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotTracked { marker } => write!(f, "marker {marker} is not tracked"),
            Self::AlreadyTracked { marker } => write!(f, "marker {marker} is already tracked"),
            Self::InvalidGeometry(e) => write!(f, "invalid geometry: {e}"),
            Self::Provider(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ClusterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for ClusterError {
    fn from(e: GeometryError) -> Self {
        Self::InvalidGeometry(e)
    }
}

impl From<ProviderError> for ClusterError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}
