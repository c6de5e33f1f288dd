//! Mask rendering for segment models.
//!
//! Rasterizes every segment pixel of a [`SegmentModel`] into its mask.

use crate::SegmentModel;

/// Mask value for pixels that belong to a segment.
pub const MASK_FOREGROUND: u8 = 255;

/// Mask value for every other pixel.
pub const MASK_BACKGROUND: u8 = 0;

/// Redraws the model's mask from its segments.
///
/// Clears the mask to [`MASK_BACKGROUND`] first, then sets each segment
/// pixel to [`MASK_FOREGROUND`], segments in order and pixels in order.
/// Every write stores the same constant, so the result does not depend on
/// traversal order and repeated calls give the same mask.
///
/// The clear always runs: a mask left over from the detector or an earlier
/// render never leaks into the output.
///
/// # Example
///
/// ```rust
/// use edgemap_core::{render_mask, Pixel, Segment, SegmentModel, MASK_FOREGROUND};
///
/// let mut model = SegmentModel::new(4, 4).unwrap();
/// model.mask_mut().fill(17);
/// model.push_segment(Segment::from_pixels(vec![Pixel::new(1, 2)])).unwrap();
///
/// render_mask(&mut model);
/// assert_eq!(model.mask().get(1, 2), Some(MASK_FOREGROUND));
/// assert_eq!(model.mask().count(MASK_FOREGROUND), 1);
/// assert_eq!(model.mask().count(17), 0);
/// ```
pub fn render_mask(model: &mut SegmentModel) {
    let (segments, mask) = model.split_mut();
    mask.fill(MASK_BACKGROUND);
    for segment in segments {
        for p in segment {
            mask.set(p.row, p.col, MASK_FOREGROUND);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pixel, Segment};

    fn horizontal(row: u32, start: u32, len: u32) -> Segment {
        (start..start + len).map(|c| Pixel::new(row, c)).collect()
    }

    #[test]
    fn test_disjoint_segments() {
        let a = horizontal(1, 0, 3);
        let b = horizontal(4, 2, 5);

        let mut forward = SegmentModel::from_segments(10, 6, [a.clone(), b.clone()]).unwrap();
        let mut reverse = SegmentModel::from_segments(10, 6, [b, a]).unwrap();
        render_mask(&mut forward);
        render_mask(&mut reverse);

        assert_eq!(forward.mask().count(MASK_FOREGROUND), 8);
        assert_eq!(forward.mask().count(MASK_BACKGROUND), 60 - 8);
        assert_eq!(forward.mask(), reverse.mask());
    }

    #[test]
    fn test_clears_stale_content() {
        let mut model = SegmentModel::from_segments(5, 5, [horizontal(0, 0, 2)]).unwrap();
        model.mask_mut().fill(MASK_FOREGROUND);

        render_mask(&mut model);
        assert_eq!(model.mask().count(MASK_FOREGROUND), 2);
    }

    #[test]
    fn test_idempotent_with_overlap() {
        let mut model =
            SegmentModel::from_segments(6, 3, [horizontal(1, 0, 4), horizontal(1, 2, 4)]).unwrap();

        render_mask(&mut model);
        let first = model.mask().clone();
        render_mask(&mut model);

        assert_eq!(model.mask(), &first);
        assert_eq!(first.count(MASK_FOREGROUND), 6);
    }
}
