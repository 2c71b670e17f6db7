//! Pixel-space cropping and cover-fit crop geometry.
//!
//! # Cover rounding
//!
//! The crop extent along the overflowing axis is rounded to the nearest
//! pixel (half rounds up) and clamped to `1..=side`. The leading offset is
//! `floor((side - extent) / 2)`, so when the leftover is odd the extra pixel
//! is removed from the trailing (right or bottom) edge.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// A rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width x height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Compute the centered source region a cover fit keeps.
///
/// The returned rectangle has the target aspect ratio (to the nearest pixel)
/// and spans the full source along the non-overflowing axis.
pub fn cover_crop_rect(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> CropRect {
    if src_width == 0 || src_height == 0 || target_width == 0 || target_height == 0 {
        return CropRect::full(src_width, src_height);
    }

    let (sw, sh) = (src_width as u64, src_height as u64);
    let (tw, th) = (target_width as u64, target_height as u64);

    if sw * th > tw * sh {
        // Source is wider than the target: trim left and right
        let width = rounded_ratio(sh, tw, th).clamp(1, sw) as u32;
        CropRect::new((src_width - width) / 2, 0, width, src_height)
    } else {
        // Source is taller (or equal): trim top and bottom
        let height = rounded_ratio(sw, th, tw).clamp(1, sh) as u32;
        CropRect::new(0, (src_height - height) / 2, src_width, height)
    }
}

/// `round(value * num / den)` in integer arithmetic, half rounding up.
#[inline]
fn rounded_ratio(value: u64, num: u64, den: u64) -> u64 {
    (2 * value * num + den) / (2 * den)
}

/// Copy a rectangular region out of an image.
///
/// The rectangle is clamped to the image bounds; the result is at least 1x1
/// for a non-empty source.
pub fn apply_crop(image: &DecodedImage, rect: CropRect) -> DecodedImage {
    if rect == CropRect::full(image.width, image.height) {
        return image.clone();
    }

    let left = rect.x.min(image.width.saturating_sub(1));
    let top = rect.y.min(image.height.saturating_sub(1));
    let right = left.saturating_add(rect.width).min(image.width);
    let bottom = top.saturating_add(rect.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let channels = image.channels();
    let src_stride = image.width as usize * channels;
    let row_bytes = out_width as usize * channels;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * channels;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
        layout: image.layout,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
