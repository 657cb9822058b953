//! Bounding box annotations and their resize adjustment.

use serde::{Deserialize, Serialize};

use super::dims::Dimensions;
use super::point::{rescale, to_relative};
use super::regime::{CoordRegime, RELATIVE_SCALE};

/// An axis-aligned bounding box as an ordered (x1, y1, x2, y2) tuple.
///
/// This type does NOT enforce x1 < x2 or y1 < y2. Malformed boxes arrive in
/// real annotation data and are adjusted like any other; callers that care
/// about ordering can check [`Bbox2D::is_ordered`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bbox2D {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Bbox2D {
    /// Creates a box from explicit corner coordinates.
    #[inline]
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns true if the box is properly ordered (x1 <= x2 and y1 <= y2).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    #[inline]
    fn max_component(&self) -> i64 {
        self.x1.max(self.y1).max(self.x2).max(self.y2)
    }

    /// Adjusts the box for an image resized from `original` to `resized`.
    ///
    /// Same policy as [`Point2D::adjust_for_resize`](super::Point2D::adjust_for_resize):
    /// in-range relative boxes pass through, out-of-range relative boxes are
    /// renormalized with a stderr warning, absolute boxes are rescaled per
    /// axis with truncation toward zero and no clamping.
    pub fn adjust_for_resize(
        &self,
        original: Dimensions,
        resized: Dimensions,
        regime: CoordRegime,
    ) -> Bbox2D {
        match regime {
            CoordRegime::Relative => {
                if self.max_component() <= RELATIVE_SCALE {
                    return *self;
                }
                eprintln!(
                    "Warning: bbox [{}, {}, {}, {}] appears to be absolute (component > {}); \
                     renormalizing against original dimensions {}",
                    self.x1, self.y1, self.x2, self.y2, RELATIVE_SCALE, original
                );
                Bbox2D {
                    x1: to_relative(self.x1, original.width),
                    y1: to_relative(self.y1, original.height),
                    x2: to_relative(self.x2, original.width),
                    y2: to_relative(self.y2, original.height),
                }
            }
            CoordRegime::Absolute => Bbox2D {
                x1: rescale(self.x1, original.width, resized.width),
                y1: rescale(self.y1, original.height, resized.height),
                x2: rescale(self.x2, original.width, resized.width),
                y2: rescale(self.y2, original.height, resized.height),
            },
        }
    }
}

impl From<[i64; 4]> for Bbox2D {
    fn from(values: [i64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }
}

impl From<Bbox2D> for [i64; 4] {
    fn from(bbox: Bbox2D) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: Dimensions = Dimensions {
        height: 600,
        width: 800,
    };
    const RESIZED: Dimensions = Dimensions {
        height: 450,
        width: 600,
    };

    #[test]
    fn absolute_bbox_is_rescaled() {
        let bbox = Bbox2D::new(100, 100, 300, 300);
        let adjusted = bbox.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Absolute);
        assert_eq!(adjusted, Bbox2D::new(75, 75, 225, 225));
    }

    #[test]
    fn relative_in_range_passes_through() {
        let bbox = Bbox2D::new(125, 167, 375, 500);
        let adjusted = bbox.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Relative);
        assert_eq!(adjusted, bbox);
    }

    #[test]
    fn relative_out_of_range_is_renormalized() {
        let bbox = Bbox2D::new(400, 300, 1200, 600);
        let adjusted = bbox.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Relative);
        // Renormalized against the ORIGINAL dimensions, not the resized ones.
        assert_eq!(adjusted, Bbox2D::new(500, 500, 1500, 1000));
    }

    #[test]
    fn absolute_noop_resize_is_identity() {
        let bbox = Bbox2D::new(10, 20, 30, 40);
        let adjusted = bbox.adjust_for_resize(ORIGINAL, ORIGINAL, CoordRegime::Absolute);
        assert_eq!(adjusted, bbox);
    }

    #[test]
    fn unordered_bbox_is_adjusted_without_reordering() {
        let bbox = Bbox2D::new(300, 300, 100, 100);
        assert!(!bbox.is_ordered());
        let adjusted = bbox.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Absolute);
        assert_eq!(adjusted, Bbox2D::new(225, 225, 75, 75));
        assert!(!adjusted.is_ordered());
    }
}
