//! Zoom level to grid resolution.

use markgrid_core::GeometryError;
use std::fmt;

/// Side length of a grid cell, in degrees.
///
/// Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct CellSize(f64);

impl CellSize {
    /// Wrap a cell size in degrees.
    ///
    /// Returns `Err(GeometryError::InvalidCellSize)` for NaN, infinite,
    /// zero, or negative values.
    pub fn new(degrees: f64) -> Result<Self, GeometryError> {
        if degrees.is_finite() && degrees > 0.0 {
            Ok(Self(degrees))
        } else {
            Err(GeometryError::InvalidCellSize { value: degrees })
        }
    }

    /// The size in degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// The clustering resolution in effect at a given zoom.
///
/// Two active resolutions produced by the same calculator are equal
/// exactly when their exponents are equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Zoomed in past the clustering threshold; every marker stands alone.
    Disabled,
    /// Markers are grouped into cells of `cell_size`.
    Active {
        /// Power of two the cell size was derived from.
        exponent: u32,
        /// Resulting cell size.
        cell_size: CellSize,
    },
}

impl Resolution {
    /// The cell size, or `None` when clustering is disabled.
    pub fn cell_size(&self) -> Option<CellSize> {
        match self {
            Self::Disabled => None,
            Self::Active { cell_size, .. } => Some(*cell_size),
        }
    }

    /// `true` for [`Resolution::Active`].
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Active {
                exponent,
                cell_size,
            } => write!(f, "2^{exponent} cells of {cell_size}"),
        }
    }
}

/// Maps camera zoom to a [`Resolution`].
///
/// `cell_size = 2^floor(zoom_offset - zoom) / base_divisor` degrees, so
/// each zoom level halves the cell size. A negative exponent (zoom past
/// `zoom_offset`) disables clustering. The exponent is clamped to
/// `max_exponent`, which keeps every finite zoom well defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSizeCalculator {
    zoom_offset: f32,
    base_divisor: f64,
    max_exponent: u32,
}

impl CellSizeCalculator {
    /// Zoom level at which clustering switches off.
    pub const DEFAULT_ZOOM_OFFSET: f32 = 23.5;
    /// Divisor applied to the power of two.
    pub const DEFAULT_BASE_DIVISOR: f64 = 100_000.0;
    /// Default exponent clamp. At the default divisor this is a cell
    /// wider than the whole map.
    pub const DEFAULT_MAX_EXPONENT: u32 = 31;
    /// Largest exponent accepted; keeps `2^exponent` exact in an `f64`.
    pub const MAX_EXPONENT_LIMIT: u32 = 62;

    /// Create a calculator. Parameters are validated by the caller's
    /// configuration layer.
    pub fn new(zoom_offset: f32, base_divisor: f64, max_exponent: u32) -> Self {
        Self {
            zoom_offset,
            base_divisor,
            max_exponent: max_exponent.min(Self::MAX_EXPONENT_LIMIT),
        }
    }

    /// Zoom level beyond which clustering is disabled.
    pub fn zoom_offset(&self) -> f32 {
        self.zoom_offset
    }

    /// Divisor applied to the power of two.
    pub fn base_divisor(&self) -> f64 {
        self.base_divisor
    }

    /// Exponent clamp.
    pub fn max_exponent(&self) -> u32 {
        self.max_exponent
    }

    /// Compute the resolution for `zoom`.
    ///
    /// Returns `Err(GeometryError::NonFiniteZoom)` for NaN or infinite
    /// zoom, and `Err(GeometryError::InvalidCellSize)` if the configured
    /// divisor produces a non-finite or non-positive size.
    pub fn resolution(&self, zoom: f32) -> Result<Resolution, GeometryError> {
        if !zoom.is_finite() {
            return Err(GeometryError::NonFiniteZoom { zoom });
        }
        let raw = (f64::from(self.zoom_offset) - f64::from(zoom)).floor();
        if raw < 0.0 {
            return Ok(Resolution::Disabled);
        }
        let exponent = if raw >= f64::from(self.max_exponent) {
            self.max_exponent
        } else {
            raw as u32
        };
        let cell_size = CellSize::new(pow2(exponent) / self.base_divisor)?;
        Ok(Resolution::Active {
            exponent,
            cell_size,
        })
    }
}

impl Default for CellSizeCalculator {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ZOOM_OFFSET,
            Self::DEFAULT_BASE_DIVISOR,
            Self::DEFAULT_MAX_EXPONENT,
        )
    }
}

fn pow2(exponent: u32) -> f64 {
    (1u64 << exponent) as f64
}
