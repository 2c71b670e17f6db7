//! Raster decoding with EXIF orientation handling.
//!
//! Any container the `image` crate is built with (JPEG, PNG, WebP) is
//! accepted. Orientation is read with `kamadak-exif`, which understands
//! JPEG, TIFF, PNG, WebP and HEIF containers.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The returned pixels are in displayed orientation, 8 bits per channel,
/// with an alpha channel only if the source has one. No metadata is carried
/// over, so anything re-encoded from the result has no orientation tag.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognised
/// raster format, `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    // First, extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;

    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded source image"
    );

    let oriented_img = apply_orientation(img, orientation);
    Ok(into_decoded(oriented_img))
}

/// Convert to 8-bit RGB, or RGBA when the source carries alpha.
fn into_decoded(img: DynamicImage) -> DecodedImage {
    if img.color().has_alpha() {
        DecodedImage::from_rgba_image(img.into_rgba8())
    } else {
        DecodedImage::from_rgb_image(img.into_rgb8())
    }
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(map_image_error)?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    Ok(img)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;
    use crate::test_support::{encode_test_jpeg, encode_test_png, split_image, with_exif_orientation};

    fn rgb(pixels: Vec<u8>, width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(width, height, pixels).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let src = split_image(8, 4);
        let bytes = encode_test_png(&src);

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img, src);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_test_jpeg(&split_image(16, 8));

        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.pixels.len(), 16 * 8 * 3);
    }

    #[test]
    fn test_decode_random_bytes_is_invalid_format() {
        let result = decode_image(&[0x13, 0x37, 0xC0, 0xFF, 0xEE]);
        assert_eq!(result, Err(DecodeError::InvalidFormat));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert_eq!(decode_image(&[]), Err(DecodeError::InvalidFormat));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_test_png(&split_image(32, 32));
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        let bytes = encode_test_jpeg(&split_image(4, 4));
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_from_exif() {
        let bytes = with_exif_orientation(&encode_test_jpeg(&split_image(4, 4)), 6);
        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        // Left half red, right half green, stored landscape
        let bytes = with_exif_orientation(&encode_test_jpeg(&split_image(32, 16)), 6);

        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (16, 32));

        // After a 90° CW turn the left half ends up on top
        let top = &img.pixels[((4 * img.width + 8) * 3) as usize..][..3];
        let bottom = &img.pixels[((28 * img.width + 8) * 3) as usize..][..3];
        assert!(top[0] > 200 && top[1] < 60, "top should be red: {:?}", top);
        assert!(bottom[1] > 200 && bottom[0] < 60, "bottom should be green: {:?}", bottom);
    }

    #[test]
    fn test_decode_keeps_alpha() {
        let src = DecodedImage::new_rgba(2, 1, vec![255, 0, 0, 0, 0, 255, 0, 128]);
        let bytes = encode_test_png(&src);

        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.layout, PixelLayout::Rgba8);
        assert_eq!(img, src);
    }

    #[test]
    fn test_decode_opaque_png_is_rgb() {
        let img = decode_image(&encode_test_png(&split_image(4, 4))).unwrap();
        assert_eq!(img.layout, PixelLayout::Rgb8);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let img = rgb(vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0], 2, 2);

        let result = apply_orientation(img, Orientation::Normal).into_rgb8();
        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let img = rgb(vec![255, 0, 0, 0, 255, 0], 2, 1);

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(result.get_pixel(0, 1).0, [0, 255, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let img = rgb(vec![255, 0, 0, 0, 255, 0], 2, 1);

        let result = apply_orientation(img, Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_transpose() {
        // 2x1 → 1x2, (x, y) maps to (y, x)
        let img = rgb(vec![255, 0, 0, 0, 255, 0], 2, 1);

        let result = apply_orientation(img, Orientation::Transpose).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(result.get_pixel(0, 1).0, [0, 255, 0]);
    }
}
