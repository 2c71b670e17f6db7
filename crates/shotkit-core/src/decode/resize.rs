//! Image resizing functions for bounded and cover-fit output.
//!
//! All functions return new `DecodedImage` instances without modifying the
//! input, and keep its pixel layout. Resampling is always Lanczos3.

use image::imageops::{self, FilterType};

use super::{DecodeError, DecodedImage, PixelLayout};
use crate::transform::{apply_crop, cover_crop_rect};

const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target, and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(image: &DecodedImage, width: u32, height: u32) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let mismatch = || DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string());

    let resized = match image.layout {
        PixelLayout::Rgb8 => {
            let view = image.as_rgb_view().ok_or_else(mismatch)?;
            DecodedImage::from_rgb_image(imageops::resize(&view, width, height, RESAMPLE_FILTER))
        }
        PixelLayout::Rgba8 => {
            let view = image.as_rgba_view().ok_or_else(mismatch)?;
            DecodedImage::from_rgba_image(imageops::resize(&view, width, height, RESAMPLE_FILTER))
        }
    };

    Ok(resized)
}

/// Scale an image down so both edges are at most `max_edge`, preserving
/// aspect ratio. Images already within bounds are returned unchanged; this
/// never upscales.
pub fn resize_within(image: &DecodedImage, max_edge: u32) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    let (src_width, src_height) = (image.width, image.height);

    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);
    resize(image, new_width, new_height)
}

/// Resize an image to exactly `width x height` using a centered cover fit.
///
/// The largest centered region with the target aspect ratio is cropped from
/// the source and scaled to the target, so no letterboxing occurs.
pub fn resize_to_cover(image: &DecodedImage, width: u32, height: u32) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    let rect = cover_crop_rect(image.width, image.height, width, height);
    let cropped = apply_crop(image, rect);
    resize(&cropped, width, height)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub(crate) fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.clamp(1, max_edge))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.clamp(1, max_edge), max_edge)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
