//! Strategy configuration, validation, and error types.
//!
//! [`GridConfig`] is the builder-input for constructing a
//! [`GridClusteringStrategy`](crate::GridClusteringStrategy).
//! [`validate()`](GridConfig::validate) checks structural invariants once
//! at construction so the hot paths never have to.

use std::error::Error;
use std::fmt;

use markgrid_core::ClusterError;
use markgrid_grid::CellSizeCalculator;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing a strategy.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// zoom_offset is NaN or infinite.
    InvalidZoomOffset {
        /// The invalid value.
        value: f32,
    },
    /// base_divisor is NaN, infinite, zero, or negative.
    InvalidDivisor {
        /// The invalid value.
        value: f64,
    },
    /// max_exponent exceeds [`CellSizeCalculator::MAX_EXPONENT_LIMIT`].
    ExponentTooLarge {
        /// The configured exponent.
        configured: u32,
        /// The largest accepted exponent.
        max: u32,
    },
    /// cluster_hue is not a finite angle in `[0, 360)`.
    InvalidHue {
        /// The invalid value.
        value: f32,
    },
    /// Placing the initial markers failed.
    Cluster(ClusterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoomOffset { value } => {
                write!(f, "zoom_offset must be finite, got {value}")
            }
            Self::InvalidDivisor { value } => {
                write!(f, "base_divisor must be finite and positive, got {value}")
            }
            Self::ExponentTooLarge { configured, max } => {
                write!(f, "max_exponent {configured} exceeds limit of {max}")
            }
            Self::InvalidHue { value } => {
                write!(f, "cluster_hue must be in [0, 360), got {value}")
            }
            Self::Cluster(e) => write!(f, "initial placement: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cluster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClusterError> for ConfigError {
    fn from(e: ClusterError) -> Self {
        Self::Cluster(e)
    }
}

// ── GridConfig ─────────────────────────────────────────────────────

/// Tuning for [`GridClusteringStrategy`](crate::GridClusteringStrategy).
///
/// The defaults reproduce the classic behaviour: cells of
/// `2^floor(23.5 - zoom) / 100000` degrees, clustering off past zoom
/// 23.5, and cyan cluster pins.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Zoom level past which clustering is disabled. Default: 23.5.
    pub zoom_offset: f32,
    /// Divisor applied to the power of two. Default: 100000.
    pub base_divisor: f64,
    /// Clamp for the cell-size exponent at low zoom. Default: 31.
    pub max_exponent: u32,
    /// Hue of representative cluster markers, in degrees. Default: 180 (cyan).
    pub cluster_hue: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            zoom_offset: CellSizeCalculator::DEFAULT_ZOOM_OFFSET,
            base_divisor: CellSizeCalculator::DEFAULT_BASE_DIVISOR,
            max_exponent: CellSizeCalculator::DEFAULT_MAX_EXPONENT,
            cluster_hue: 180.0,
        }
    }
}

impl GridConfig {
    /// Check every field, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_offset.is_finite() {
            return Err(ConfigError::InvalidZoomOffset {
                value: self.zoom_offset,
            });
        }
        if !(self.base_divisor.is_finite() && self.base_divisor > 0.0) {
            return Err(ConfigError::InvalidDivisor {
                value: self.base_divisor,
            });
        }
        if self.max_exponent > CellSizeCalculator::MAX_EXPONENT_LIMIT {
            return Err(ConfigError::ExponentTooLarge {
                configured: self.max_exponent,
                max: CellSizeCalculator::MAX_EXPONENT_LIMIT,
            });
        }
        if !(self.cluster_hue.is_finite() && (0.0..360.0).contains(&self.cluster_hue)) {
            return Err(ConfigError::InvalidHue {
                value: self.cluster_hue,
            });
        }
        Ok(())
    }

    /// The zoom-to-resolution mapping described by this config.
    pub fn calculator(&self) -> CellSizeCalculator {
        CellSizeCalculator::new(self.zoom_offset, self.base_divisor, self.max_exponent)
    }
}
