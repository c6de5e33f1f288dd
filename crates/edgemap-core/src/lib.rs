//! # edgemap-core
//!
//! Core types for edge-detection pipelines.
//!
//! This crate provides the in-memory side of the workspace:
//!
//! - [`GrayRaster`], [`RgbPlanes`] - Owned row-major sample buffers
//! - [`Pixel`], [`Segment`] - Traced pixel chains
//! - [`SegmentModel`] - Complete output of one detection pass plus its mask
//! - [`render_mask`] - Rasterizes a model into its mask
//! - [`EdgeDetector`] - Boundary trait for external detectors
//!
//! ## Crate Structure
//!
//! ```text
//! edgemap-core (this crate)
//!    ^
//!    |
//!    +-- edgemap-io (PGM/PPM decoding, mask and PLY export)
//! ```
//!
//! ## Ownership
//!
//! Decoders hand out owned rasters, detectors hand out owned models, and
//! everything downstream borrows. Nothing is reference counted.
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`DetectParams`] and [`Pixel`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detect;
pub mod error;
pub mod pixel;
pub mod raster;
pub mod render;
pub mod segment;

pub use detect::{DetectParams, EdgeDetector};
pub use error::{Error, Result};
pub use pixel::Pixel;
pub use raster::{GrayRaster, RgbPlanes};
pub use render::{render_mask, MASK_BACKGROUND, MASK_FOREGROUND};
pub use segment::{Segment, SegmentModel};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use edgemap_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::detect::{DetectParams, EdgeDetector};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::Pixel;
    pub use crate::raster::{GrayRaster, RgbPlanes};
    pub use crate::render::{render_mask, MASK_BACKGROUND, MASK_FOREGROUND};
    pub use crate::segment::{Segment, SegmentModel};
}
