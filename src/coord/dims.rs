//! Image dimensions and header-only dimension probing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VlprepError;

/// Image dimensions as (height, width), both in pixels.
///
/// Represents either an original or a resized image size. Construction does
/// not validate positivity; the resize calculator guarantees its outputs are
/// positive, and probed dimensions come from actual image headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    /// Creates dimensions from explicit height and width.
    #[inline]
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Total pixel count.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }

    /// Reads (height, width) from an image file header without decoding
    /// pixel data.
    pub fn probe(path: &Path) -> Result<Self, VlprepError> {
        let size = imagesize::size(path).map_err(|source| VlprepError::ImageDimensionRead {
            path: path.to_path_buf(),
            source,
        })?;

        // A header claiming dimensions beyond u32 is treated as corrupt.
        let width: u32 = size
            .width
            .try_into()
            .map_err(|_| VlprepError::ImageDimensionRead {
                path: path.to_path_buf(),
                source: imagesize::ImageError::CorruptedImage,
            })?;

        let height: u32 = size
            .height
            .try_into()
            .map_err(|_| VlprepError::ImageDimensionRead {
                path: path.to_path_buf(),
                source: imagesize::ImageError::CorruptedImage,
            })?;

        Ok(Self { height, width })
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
