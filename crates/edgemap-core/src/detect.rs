//! Boundary to external edge and contour detectors.
//!
//! The detection algorithms live outside this workspace. They plug in by
//! implementing [`EdgeDetector`]: take a grayscale raster plus thresholds,
//! return an owned [`SegmentModel`].

use crate::{GrayRaster, Result, SegmentModel};

/// Numeric settings passed to a detector.
///
/// `threshold` is the primary gradient threshold. `second_threshold` is
/// detector specific: a cutoff for black-and-white contour maps, or a
/// minimum segment length for edge linkers. Detectors that take a single
/// threshold ignore it.
///
/// With the `serde` feature enabled this can be loaded from a config file:
///
/// ```json
/// { "threshold": 20, "second_threshold": 8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectParams {
    /// Primary threshold.
    pub threshold: i32,
    /// Optional second threshold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub second_threshold: Option<i32>,
}

impl DetectParams {
    /// Creates params with only the primary threshold.
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold,
            second_threshold: None,
        }
    }

    /// Sets the second threshold.
    pub fn with_second_threshold(mut self, value: i32) -> Self {
        self.second_threshold = Some(value);
        self
    }
}

/// An edge or contour detector.
///
/// Implementations must be synchronous and deterministic for fixed inputs.
/// The returned model's dimensions match `raster`, and ownership passes to
/// the caller.
pub trait EdgeDetector {
    /// Runs detection on `raster`.
    fn detect(&self, raster: &GrayRaster, params: &DetectParams) -> Result<SegmentModel>;
}

impl<D: EdgeDetector + ?Sized> EdgeDetector for &D {
    fn detect(&self, raster: &GrayRaster, params: &DetectParams) -> Result<SegmentModel> {
        (**self).detect(raster, params)
    }
}
