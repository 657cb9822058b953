//! Patch-aligned resize dimension calculator.

use super::dims::Dimensions;
use crate::error::VlprepError;

/// Maximum allowed ratio between the longer and shorter image side.
pub const MAX_ASPECT_RATIO: u32 = 200;

/// Computes output dimensions for an image resized under a pixel budget.
///
/// Each output dimension is a positive multiple of `factor` (typically 28:
/// patch size 14 times spatial merge size 2), and the output area lands in
/// `[min_pixels, max_pixels]` unless the rounded input area is already within
/// that band, in which case only rounding is applied.
///
/// # Errors
///
/// Fails with [`VlprepError::InvalidResizeFactor`] when `factor` is zero, and
/// with [`VlprepError::AspectRatio`] when the aspect ratio exceeds
/// [`MAX_ASPECT_RATIO`].
pub fn smart_resize(
    height: u32,
    width: u32,
    factor: u32,
    min_pixels: u32,
    max_pixels: u32,
) -> Result<Dimensions, VlprepError> {
    if factor == 0 {
        return Err(VlprepError::InvalidResizeFactor);
    }

    let height_f = f64::from(height);
    let width_f = f64::from(width);
    let factor_f = f64::from(factor);

    let ratio = height_f.max(width_f) / height_f.min(width_f).max(1.0);
    if ratio > f64::from(MAX_ASPECT_RATIO) {
        return Err(VlprepError::AspectRatio {
            width,
            height,
            ratio,
            max_ratio: MAX_ASPECT_RATIO,
        });
    }

    let mut h_bar = round_by_factor(height_f, factor_f).max(factor_f);
    let mut w_bar = round_by_factor(width_f, factor_f).max(factor_f);

    if h_bar * w_bar > f64::from(max_pixels) {
        let beta = ((height_f * width_f) / f64::from(max_pixels)).sqrt();
        h_bar = floor_by_factor(height_f / beta, factor_f);
        w_bar = floor_by_factor(width_f / beta, factor_f);
    } else if h_bar * w_bar < f64::from(min_pixels) {
        let beta = (f64::from(min_pixels) / (height_f * width_f)).sqrt();
        h_bar = ceil_by_factor(height_f * beta, factor_f);
        w_bar = ceil_by_factor(width_f * beta, factor_f);
    }

    Ok(Dimensions {
        height: h_bar.max(factor_f) as u32,
        width: w_bar.max(factor_f) as u32,
    })
}

#[inline]
fn round_by_factor(value: f64, factor: f64) -> f64 {
    (value / factor).round() * factor
}

#[inline]
fn floor_by_factor(value: f64, factor: f64) -> f64 {
    (value / factor).floor() * factor
}

#[inline]
fn ceil_by_factor(value: f64, factor: f64) -> f64 {
    (value / factor).ceil() * factor
}
