//! Error types for edgemap-core operations.
//!
//! Covers the failure modes of building rasters and segment models:
//! - Raster allocation and sizing
//! - Pixel coordinates that fall outside the model bounds
//! - Dimension mismatches between a model and its mask
//!
//! # Usage
//!
//! ```rust
//! use edgemap_core::{Error, Result};
//!
//! fn check_pixel(row: u32, col: u32, width: u32, height: u32) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, width, height));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Used By
//!
//! - [`crate::raster::GrayRaster`] - Buffer allocation
//! - [`crate::segment::SegmentModel`] - Bounds validation on insertion
//! - `edgemap-io` - Converted to `IoError::Allocation` or `IoError::Format`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building rasters and segment models.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **Dimension errors**: [`DimensionMismatch`](Error::DimensionMismatch), [`InvalidDimensions`](Error::InvalidDimensions)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside the raster bounds.
    ///
    /// Returned when a pixel at (row, col) has `row >= height` or
    /// `col >= width`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use edgemap_core::Error;
    ///
    /// let err = Error::out_of_bounds(12, 40, 32, 10);
    /// assert!(err.to_string().contains("40"));
    /// ```
    #[error("pixel (row {row}, col {col}) out of bounds for raster {width}x{height}")]
    OutOfBounds {
        /// Row that was out of bounds
        row: u32,
        /// Column that was out of bounds
        col: u32,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },

    /// Memory allocation failed.
    ///
    /// Returned when a raster buffer of `width * height` bytes cannot be
    /// reserved.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// Raster dimensions don't match.
    ///
    /// Returned when a mask or sample buffer does not have the size the
    /// model or raster expects.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size
        expected: String,
        /// Actual size
        actual: String,
    },

    /// Invalid raster dimensions.
    ///
    /// Returned when width or height is zero, or `width * height`
    /// overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: u32, col: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            row,
            col,
            width,
            height,
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error from two `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
