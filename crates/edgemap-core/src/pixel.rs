//! Integer pixel coordinates.

/// A pixel position as (row, col), origin at the top-left corner.
///
/// Rows grow downward, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
}

impl Pixel {
    /// Creates a pixel at (row, col).
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the pixel lies inside a `width x height` raster.
    #[inline]
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.row < height && self.col < width
    }
}

impl From<(u32, u32)> for Pixel {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}
