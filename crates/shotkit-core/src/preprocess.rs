//! One-shot normalization of a source image into a clean PNG.

use serde::Serialize;

use crate::clean::{auto_clean, AutoCleanPolicy};
use crate::decode::decode_image;
use crate::encode::{encode_png_image, PNG_MIME_TYPE};
use crate::PipelineError;

/// Output of [`preprocess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreprocessResult {
    #[serde(skip)]
    bytes: Vec<u8>,
    mime_type: &'static str,
    /// Width of the encoded image.
    pub width: u32,
    /// Height of the encoded image.
    pub height: u32,
}

impl PreprocessResult {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Always `image/png`.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// Decode, auto-orient, clean and re-encode `input` as PNG.
///
/// Applies [`AutoCleanPolicy::STANDARD`]. Byte-identical input always gives
/// byte-identical output.
///
/// # Errors
///
/// Returns `PipelineError::Decode` if `input` is not a decodable raster image.
pub fn preprocess(input: &[u8]) -> Result<PreprocessResult, PipelineError> {
    let span = tracing::debug_span!("preprocess", input_len = input.len());
    let _enter = span.enter();

    let source = decode_image(input)?;
    let cleaned = auto_clean(&source, &AutoCleanPolicy::STANDARD)?;
    drop(source);

    let bytes = encode_png_image(&cleaned)?;
    tracing::info!(
        width = cleaned.width,
        height = cleaned.height,
        output_len = bytes.len(),
        "preprocess complete"
    );

    Ok(PreprocessResult {
        bytes,
        mime_type: PNG_MIME_TYPE,
        width: cleaned.width,
        height: cleaned.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use crate::test_support::{
        encode_test_jpeg, encode_test_png, gradient_image, split_image, transparent_border_image,
        with_exif_orientation,
    };

    #[test]
    fn test_output_is_png() {
        let input = encode_test_png(&gradient_image(48, 32));
        let result = preprocess(&input).unwrap();

        assert_eq!(result.mime_type(), "image/png");
        assert_eq!(&result.bytes()[1..4], b"PNG");
        assert_eq!((result.width, result.height), (48, 32));

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 32));
    }

    #[test]
    fn test_deterministic() {
        let input = encode_test_jpeg(&gradient_image(80, 60));
        let a = preprocess(&input).unwrap();
        let b = preprocess(&input).unwrap();
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let input = encode_test_png(&split_image(10, 6));
        let result = preprocess(&input).unwrap();
        assert_eq!((result.width, result.height), (10, 6));
    }

    #[test]
    fn test_large_image_bounded() {
        let input = encode_test_jpeg(&gradient_image(2600, 400));
        let result = preprocess(&input).unwrap();
        assert_eq!((result.width, result.height), (2048, 315));
    }

    #[test]
    fn test_exif_orientation_applied() {
        let stored = encode_test_jpeg(&split_image(40, 20));
        let input = with_exif_orientation(&stored, 6);

        let result = preprocess(&input).unwrap();
        assert_eq!((result.width, result.height), (20, 40));

        let out = image::load_from_memory(result.bytes()).unwrap().into_rgb8();
        // Rotated 90 degrees clockwise: the red left half is now on top
        let top = out.get_pixel(10, 2);
        let bottom = out.get_pixel(10, 37);
        assert!(top[0] > top[1], "top should be red: {:?}", top);
        assert!(bottom[1] > bottom[0], "bottom should be green: {:?}", bottom);
    }

    #[test]
    fn test_transparent_png_keeps_alpha() {
        let input = encode_test_png(&transparent_border_image(8, 8));
        let result = preprocess(&input).unwrap();
        assert_eq!((result.width, result.height), (8, 8));

        let decoded = image::load_from_memory(result.bytes()).unwrap();
        assert!(decoded.color().has_alpha());

        let out = decoded.into_rgba8();
        assert_eq!(out.get_pixel(0, 0)[3], 0, "corner must stay transparent");
        let centre = out.get_pixel(4, 4);
        assert_eq!(centre[3], 255);
        assert!(centre[0] > 200, "centre should stay light: {:?}", centre);
    }

    #[test]
    fn test_undecodable_input() {
        let result = preprocess(&[0x13, 0x37, 0x00, 0xFF, 0x42]);
        assert!(matches!(
            result,
            Err(PipelineError::Decode(DecodeError::InvalidFormat))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            preprocess(&[]),
            Err(PipelineError::Decode(DecodeError::InvalidFormat))
        ));
    }
}
