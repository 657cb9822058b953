//! Coordinate handling for resize-aware annotation data.
//!
//! This module owns everything spatial in vlprep: the value types for points
//! and boxes, the two coordinate regimes, the patch-aligned resize
//! calculator, and the text rewriter that keeps annotations embedded in
//! conversation text consistent with a resized image.
//!
//! # Design principles
//!
//! 1. **Explicit regimes**: whether a value is on the relative 0-1000 scale
//!    or in absolute pixels is carried as [`CoordRegime`], never a bare
//!    boolean, so the two cannot be swapped silently.
//!
//! 2. **Permissive values**: [`Point2D`] and [`Bbox2D`] represent "invalid"
//!    data (negative, out-of-range, unordered) without complaint. The only
//!    correction is renormalizing mistakenly-absolute relative values;
//!    nothing clamps.
//!
//! 3. **Textual substitution**: the rewriter treats conversation text as an
//!    opaque byte stream with embedded fragments, never as a JSON document.
//!
//! # Example
//!
//! ```
//! use vlprep::coord::{
//!     adjust_points_in_text, AdjustContext, CoordRegime, Dimensions,
//! };
//!
//! let ctx = AdjustContext::new(
//!     Dimensions::new(600, 800),
//!     Dimensions::new(450, 600),
//!     CoordRegime::Absolute,
//! );
//! let text = r#"{"point_2d": [400, 300], "label": "person"}"#;
//! assert_eq!(
//!     adjust_points_in_text(text, &ctx),
//!     r#"{"point_2d": [300, 225], "label": "person"}"#
//! );
//! ```

mod bbox;
mod dims;
mod point;
mod regime;
mod resize;
mod rewrite;

// Re-export core types for convenient access
pub use bbox::Bbox2D;
pub use dims::Dimensions;
pub use point::Point2D;
pub use regime::{CoordRegime, RELATIVE_SCALE};
pub use resize::{smart_resize, MAX_ASPECT_RATIO};
pub use rewrite::{
    adjust_bboxes_in_text, adjust_points_in_text, contains_fragment, rewrite_fragments,
    AdjustContext, FragmentKind,
};

#[cfg(feature = "fuzzing")]
pub use rewrite::fuzz_rewrite_fragments;
