//! 2D point annotations and their resize adjustment.

use serde::{Deserialize, Serialize};

use super::dims::Dimensions;
use super::regime::{CoordRegime, RELATIVE_SCALE};

/// A point annotation as an ordered (x, y) pair of integers.
///
/// The coordinate regime is not stored on the value; it is supplied by the
/// caller at each transformation (see [`CoordRegime`]). Values outside the
/// image or the relative scale are representable: validation and correction
/// happen at adjustment time, never at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2D {
    pub x: i64,
    pub y: i64,
}

impl Point2D {
    /// Creates a point from explicit coordinates.
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Largest component, used to detect absolute values smuggled into the
    /// relative regime.
    #[inline]
    fn max_component(&self) -> i64 {
        self.x.max(self.y)
    }

    /// Adjusts the point for an image resized from `original` to `resized`.
    ///
    /// Relative-regime points within the 0-1000 scale pass through unchanged.
    /// Relative-regime points with a component above 1000 are treated as
    /// mistakenly-absolute and renormalized against the original dimensions,
    /// with a warning on stderr. Absolute-regime points are rescaled per axis
    /// by the resize ratios.
    ///
    /// All arithmetic truncates toward zero. No bounds clamping is applied;
    /// out-of-range results are returned as-is.
    pub fn adjust_for_resize(
        &self,
        original: Dimensions,
        resized: Dimensions,
        regime: CoordRegime,
    ) -> Point2D {
        match regime {
            CoordRegime::Relative => {
                if self.max_component() <= RELATIVE_SCALE {
                    return *self;
                }
                eprintln!(
                    "Warning: point [{}, {}] appears to be absolute (component > {}); \
                     renormalizing against original dimensions {}",
                    self.x, self.y, RELATIVE_SCALE, original
                );
                Point2D {
                    x: to_relative(self.x, original.width),
                    y: to_relative(self.y, original.height),
                }
            }
            CoordRegime::Absolute => Point2D {
                x: rescale(self.x, original.width, resized.width),
                y: rescale(self.y, original.height, resized.height),
            },
        }
    }
}

/// Renormalizes an absolute component onto the 0-1000 relative scale,
/// truncating toward zero.
#[inline]
pub(crate) fn to_relative(value: i64, original_dim: u32) -> i64 {
    ((value as f64 / f64::from(original_dim)) * RELATIVE_SCALE as f64) as i64
}

/// Rescales an absolute component by a resize ratio, truncating toward zero.
#[inline]
pub(crate) fn rescale(value: i64, original_dim: u32, resized_dim: u32) -> i64 {
    (value as f64 * f64::from(resized_dim) / f64::from(original_dim)) as i64
}

impl From<[i64; 2]> for Point2D {
    fn from(values: [i64; 2]) -> Self {
        Self::new(values[0], values[1])
    }
}

impl From<Point2D> for [i64; 2] {
    fn from(point: Point2D) -> Self {
        [point.x, point.y]
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
    fn absolute_point_is_rescaled() {
        let point = Point2D::new(400, 300);
        let adjusted = point.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Absolute);
        assert_eq!(adjusted, Point2D::new(300, 225));
    }

    #[test]
    fn absolute_noop_resize_is_identity() {
        let point = Point2D::new(123, 456);
        let adjusted = point.adjust_for_resize(ORIGINAL, ORIGINAL, CoordRegime::Absolute);
        assert_eq!(adjusted, point);
    }

    #[test]
    fn relative_in_range_passes_through() {
        let point = Point2D::new(500, 1000);
        let adjusted = point.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Relative);
        assert_eq!(adjusted, point);
    }

    #[test]
    fn relative_out_of_range_is_renormalized() {
        // 1600/800 * 1000 = 2000 -> truncated; 300/600 * 1000 = 500
        let point = Point2D::new(1600, 300);
        let adjusted = point.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Relative);
        assert_eq!(adjusted, Point2D::new(2000, 500));
    }

    #[test]
    fn rescale_truncates_toward_zero() {
        // 100 * 450 / 600 = 75.0; 101 * 450 / 600 = 75.75 -> 75
        assert_eq!(rescale(100, 600, 450), 75);
        assert_eq!(rescale(101, 600, 450), 75);
        // negative values truncate toward zero, not toward negative infinity
        assert_eq!(rescale(-101, 600, 450), -75);
    }

    #[test]
    fn out_of_bounds_absolute_results_pass_through() {
        // Upstream noise can put coordinates past the image edge; the
        // transform neither clamps nor warns.
        let point = Point2D::new(900, -40);
        let adjusted = point.adjust_for_resize(ORIGINAL, RESIZED, CoordRegime::Absolute);
        assert_eq!(adjusted, Point2D::new(675, -30));
    }
}
