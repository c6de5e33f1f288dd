//! Edge segments and the detector output model.
//!
//! A [`Segment`] is an ordered chain of [`Pixel`]s traced by a detector. A
//! [`SegmentModel`] collects every segment of one detection pass together
//! with a mask raster of the same size as the source image.
//!
//! # Iteration Order
//!
//! Segment order and pixel order are part of the contract: both are the
//! insertion order, stable and deterministic. Mask rendering and mesh export
//! make several passes over [`SegmentModel::segments`] and rely on every
//! pass seeing the same sequence.
//!
//! # Invariants
//!
//! - Every pixel of every segment lies inside `[0, height) x [0, width)`.
//!   [`SegmentModel::push_segment`] rejects anything else.
//! - The mask has the model's dimensions.
//!
//! # Example
//!
//! ```rust
//! use edgemap_core::{Pixel, Segment, SegmentModel};
//!
//! let mut model = SegmentModel::new(8, 8).unwrap();
//! model
//!     .push_segment(Segment::from_pixels(vec![Pixel::new(0, 0), Pixel::new(0, 1)]))
//!     .unwrap();
//! assert_eq!(model.segment_count(), 1);
//! assert_eq!(model.total_pixels(), 2);
//! ```

use crate::{Error, GrayRaster, Pixel, Result};

/// Ordered chain of pixels forming one traced edge or contour.
///
/// Adjacency between consecutive pixels is conventional and not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pixels: Vec<Pixel>,
}

impl Segment {
    /// Creates an empty segment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a segment from pixels in chain order.
    pub fn from_pixels(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    /// Appends a pixel to the end of the chain.
    #[inline]
    pub fn push(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }

    /// Number of pixels in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if the chain has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels in chain order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterates pixels in chain order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }
}

impl FromIterator<Pixel> for Segment {
    fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
        Self {
            pixels: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Segment {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// Output of one detection pass: ordered segments plus a mask raster.
///
/// Detectors build the model and return it by value; the caller owns it
/// from then on. Rendering and export borrow it and never consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentModel {
    width: u32,
    height: u32,
    segments: Vec<Segment>,
    mask: GrayRaster,
}

impl SegmentModel {
    /// Creates an empty model with a zero-filled mask.
    ///
    /// # Errors
    ///
    /// Fails if the mask cannot be allocated or the dimensions are zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self::with_mask(GrayRaster::try_new(width, height)?))
    }

    /// Creates an empty model around a detector-provided mask.
    ///
    /// The model takes its dimensions from the mask. Detectors that produce
    /// a soft contour map hand it over this way.
    pub fn with_mask(mask: GrayRaster) -> Self {
        let (width, height) = mask.dimensions();
        Self {
            width,
            height,
            segments: Vec::new(),
            mask,
        }
    }

    /// Creates a model from segments, validating every pixel.
    pub fn from_segments(
        width: u32,
        height: u32,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self> {
        let mut model = Self::new(width, height)?;
        for segment in segments {
            model.push_segment(segment)?;
        }
        Ok(model)
    }

    /// Appends a segment after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for the first pixel outside the model;
    /// the model is left unchanged.
    pub fn push_segment(&mut self, segment: Segment) -> Result<()> {
        if let Some(p) = segment
            .iter()
            .find(|p| !p.in_bounds(self.width, self.height))
        {
            return Err(Error::out_of_bounds(p.row, p.col, self.width, self.height));
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Model width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Model height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segments in insertion order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns segment `index`, or `None` past the end.
    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Sum of pixel counts over all segments.
    pub fn total_pixels(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// The mask raster.
    ///
    /// Holds whatever the detector or the last render left in it; call
    /// [`render_mask`](crate::render::render_mask) before persisting.
    #[inline]
    pub fn mask(&self) -> &GrayRaster {
        &self.mask
    }

    /// The mask samples, mutably, in row-major order.
    ///
    /// Only the samples are exposed so the mask keeps the model's
    /// dimensions; use [`set_mask`](Self::set_mask) to replace it whole.
    #[inline]
    pub fn mask_mut(&mut self) -> &mut [u8] {
        self.mask.data_mut()
    }

    /// Replaces the mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `mask` is not the model's
    /// size; the current mask is kept.
    pub fn set_mask(&mut self, mask: GrayRaster) -> Result<()> {
        if mask.dimensions() != self.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), mask.dimensions()));
        }
        self.mask = mask;
        Ok(())
    }

    /// Borrows the segments and the mutable mask at the same time.
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&[Segment], &mut GrayRaster) {
        (&self.segments, &mut self.mask)
    }

    /// Consumes the model, returning its segments and mask.
    pub fn into_parts(self) -> (Vec<Segment>, GrayRaster) {
        (self.segments, self.mask)
    }
}
