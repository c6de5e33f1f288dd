//! Raster buffer types.
//!
//! This module provides the owned sample containers handed out by decoders
//! and consumed by detectors:
//! - [`GrayRaster`] - Single-channel 8-bit raster
//! - [`RgbPlanes`] - Three same-size planes holding red, green and blue
//!
//! # Memory Layout
//!
//! Rasters store samples in **row-major** order, top-to-bottom, origin at
//! the top-left corner:
//!
//! ```text
//! Memory: [s(0,0) s(0,1) ... s(0,W-1)]  <- Row 0
//!         [s(1,0) s(1,1) ... s(1,W-1)]  <- Row 1
//!         ...
//! ```
//!
//! Color rasters are planar: interleaved R,G,B samples from a file are
//! split into three independent [`GrayRaster`]s at decode time.
//!
//! # Ownership
//!
//! A raster owns its buffer outright. Decoders return it by value, the
//! caller lends it out by reference and it is released when dropped. There
//! is no shared or reference-counted storage.

use crate::{Error, Result};

/// Computes `width * height`, rejecting zero-area and overflowing sizes.
///
/// # Example
///
/// ```rust
/// use edgemap_core::raster::sample_count;
///
/// assert_eq!(sample_count(4, 3).unwrap(), 12);
/// assert!(sample_count(0, 3).is_err());
/// ```
pub fn sample_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "zero area"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))
}

/// Owned single-channel 8-bit raster.
///
/// # Example
///
/// ```rust
/// use edgemap_core::GrayRaster;
///
/// let mut raster = GrayRaster::try_new(4, 2).unwrap();
/// raster.set(1, 3, 200);
/// assert_eq!(raster.get(1, 3), Some(200));
/// assert_eq!(raster.data()[7], 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayRaster {
    /// Creates a zero-filled raster.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let len = sample_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a raster from the first `width * height` items of `samples`.
    ///
    /// The buffer is reserved up front but only written as samples arrive,
    /// so no page is touched for samples that are not there.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero or
    ///   `samples` runs out early
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn try_from_samples<I>(width: u32, height: u32, samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        let len = sample_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
        data.extend(samples.into_iter().take(len));
        Self::from_data(width, height, data)
    }

    /// Creates a raster from existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raster dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of samples (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the raster holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw samples in row-major order.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw samples mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the raster and returns its buffer.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the buffer offset of (row, col), or `None` if out of bounds.
    #[inline]
    pub fn offset(&self, row: u32, col: u32) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row as usize * self.width as usize + col as usize)
        } else {
            None
        }
    }

    /// Returns the sample at (row, col), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        self.offset(row, col).map(|i| self.data[i])
    }

    /// Sets the sample at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if (row, col) is out of bounds.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: u8) {
        let i = self
            .offset(row, col)
            .unwrap_or_else(|| panic!("pixel ({row}, {col}) out of bounds"));
        self.data[i] = value;
    }

    /// Sets every sample to `value`.
    #[inline]
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Counts the samples equal to `value`.
    pub fn count(&self, value: u8) -> usize {
        self.data.iter().filter(|&&s| s == value).count()
    }
}

/// Planar three-channel raster.
///
/// Produced by the color decoder; each plane is an independent
/// [`GrayRaster`] with the same dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPlanes {
    /// Red samples.
    pub red: GrayRaster,
    /// Green samples.
    pub green: GrayRaster,
    /// Blue samples.
    pub blue: GrayRaster,
}

impl RgbPlanes {
    /// Groups three planes, checking that their dimensions agree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if green or blue differ from red.
    pub fn from_planes(red: GrayRaster, green: GrayRaster, blue: GrayRaster) -> Result<Self> {
        for plane in [&green, &blue] {
            if plane.dimensions() != red.dimensions() {
                return Err(Error::dimension_mismatch(red.dimensions(), plane.dimensions()));
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Returns the shared dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.red.dimensions()
    }

    /// Splits into `(red, green, blue)`.
    #[inline]
    pub fn into_channels(self) -> (GrayRaster, GrayRaster, GrayRaster) {
        (self.red, self.green, self.blue)
    }
}
