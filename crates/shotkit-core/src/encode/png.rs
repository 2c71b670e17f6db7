//! PNG encoding for pipeline output.
//!
//! Every rendition is written as 8-bit RGB or RGBA PNG (following the pixel
//! layout of the image) with the encoder's best
//! compression and adaptive per-row filtering. The encoder writes no
//! timestamps or metadata chunks, so output bytes depend only on the pixels.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{DecodedImage, PixelLayout};

/// Errors that can occur while producing output bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * channels), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// An intermediate resize or crop failed
    #[error("Image transform failed: {0}")]
    Transform(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the archive failed
    #[error("Archive write failed: {0}")]
    Archive(String),
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    encode_png_with_layout(pixels, width, height, PixelLayout::Rgb8)
}

/// Encode RGB or RGBA pixel data to PNG bytes.
pub fn encode_png_with_layout(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * layout.channels();
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive);

    encoder
        .write_image(pixels, width, height, layout.color_type())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Encode a decoded image to PNG bytes.
pub fn encode_png_image(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    encode_png_with_layout(&image.pixels, image.width, image.height, image.layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient_image;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let png = encode_png(&pixels, 100, 100).unwrap();

        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        // Ends with the IEND chunk
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_encode_png_round_trips_pixels() {
        let img = gradient_image(37, 21);
        let png = encode_png_image(&img).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (37, 21));
        assert_eq!(decoded.into_raw(), img.pixels);
    }

    #[test]
    fn test_encode_png_keeps_alpha() {
        let pixels = vec![10, 20, 30, 0, 40, 50, 60, 255];
        let img = DecodedImage::new_rgba(2, 1, pixels.clone());
        let png = encode_png_image(&img).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.into_rgba8().into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_rgba_length_checked() {
        // A valid RGB length is short for RGBA
        let result = encode_png_with_layout(&[0u8; 2 * 2 * 3], 2, 2, PixelLayout::Rgba8);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData { expected: 16, actual: 12 })
        ));
    }

    #[test]
    fn test_encode_png_carries_no_exif() {
        let png = encode_png_image(&gradient_image(8, 8)).unwrap();
        assert!(!png.windows(4).any(|w| w == b"eXIf"));
    }

    #[test]
    fn test_encode_png_invalid_pixel_data_short() {
        let pixels = vec![128u8; 99 * 100 * 3];
        let result = encode_png(&pixels, 100, 100);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_zero_width() {
        let result = encode_png(&[], 0, 100);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_zero_height() {
        let result = encode_png(&[], 100, 0);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_best_compression_beats_raw_size() {
        let img = gradient_image(64, 64);
        let png = encode_png_image(&img).unwrap();
        assert!(png.len() < img.pixels.len());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
