//! Coordinate regime tags.
//!
//! Spatial annotations come in two regimes. Relative coordinates live on a
//! fixed 0-1000 scale regardless of image pixel size and are invariant under
//! resize. Absolute coordinates are pixel offsets on a specific image size
//! and must be rescaled whenever that image is resized.
//!
//! The regime is carried as an explicit enum rather than a bare boolean so
//! that call sites cannot silently swap the two.

use serde::{Deserialize, Serialize};

/// The coordinate regime an annotation is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordRegime {
    /// Fixed 0-1000 scale, independent of pixel dimensions.
    Relative,
    /// Pixel offsets on the original image; rescaled on resize.
    Absolute,
}

/// Upper bound of the relative coordinate scale.
pub const RELATIVE_SCALE: i64 = 1000;

impl CoordRegime {
    /// Human-readable name for the regime.
    pub fn name(&self) -> &'static str {
        match self {
            CoordRegime::Relative => "relative",
            CoordRegime::Absolute => "absolute",
        }
    }
}
