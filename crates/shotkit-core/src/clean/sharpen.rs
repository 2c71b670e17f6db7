//! Unsharp-mask sharpening.

use crate::decode::{DecodedImage, PixelLayout};
use crate::encode::EncodeError;

/// Sharpen with an unsharp mask: Gaussian blur of the given sigma, then add
/// back the difference between the image and its blur.
///
/// A non-positive sigma returns a copy.
///
/// # Errors
///
/// Returns `EncodeError::InvalidPixelData` if the pixel buffer does not match
/// the declared dimensions.
pub fn sharpen(image: &DecodedImage, sigma: f32) -> Result<DecodedImage, EncodeError> {
    if sigma <= 0.0 || image.is_empty() {
        return Ok(image.clone());
    }

    let mismatch = || EncodeError::InvalidPixelData {
        expected: image.expected_len(),
        actual: image.pixels.len(),
    };

    match image.layout {
        PixelLayout::Rgb8 => {
            let view = image.as_rgb_view().ok_or_else(mismatch)?;
            Ok(DecodedImage::from_rgb_image(image::imageops::unsharpen(&view, sigma, 0)))
        }
        PixelLayout::Rgba8 => {
            let view = image.as_rgba_view().ok_or_else(mismatch)?;
            Ok(DecodedImage::from_rgba_image(image::imageops::unsharpen(&view, sigma, 0)))
        }
    }
}
