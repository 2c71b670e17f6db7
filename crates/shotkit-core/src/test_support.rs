//! Shared fixtures for unit tests.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::decode::DecodedImage;

/// Horizontal red ramp with a vertical green ramp and constant blue.
pub fn gradient_image(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width.max(1)) as u8);
            pixels.push((y * 255 / height.max(1)) as u8);
            pixels.push(128);
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// Left half pure red, right half pure green.
pub fn split_image(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            if x < width / 2 {
                pixels.extend_from_slice(&[255, 0, 0]);
            } else {
                pixels.extend_from_slice(&[0, 255, 0]);
            }
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// Opaque white centre inside a fully transparent black border a quarter of
/// the short edge wide.
pub fn transparent_border_image(width: u32, height: u32) -> DecodedImage {
    let border = (width.min(height) / 4).max(1);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let inside = (border..width - border).contains(&x) && (border..height - border).contains(&y);
            if inside {
                pixels.extend_from_slice(&[255, 255, 255, 255]);
            } else {
                pixels.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    DecodedImage::new_rgba(width, height, pixels)
}

pub fn encode_test_jpeg(image: &DecodedImage) -> Vec<u8> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

pub fn encode_test_png(image: &DecodedImage) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&image.pixels, image.width, image.height, image.layout.color_type())
        .unwrap();
    out
}

/// Insert an APP1 EXIF segment carrying only an Orientation tag right after
/// the SOI marker of a JPEG.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let [hi, lo] = orientation.to_be_bytes();
    #[rustfmt::skip]
    let segment: [u8; 36] = [
        0xFF, 0xE1, 0x00, 0x22,
        b'E', b'x', b'i', b'f', 0x00, 0x00,
        // Big-endian TIFF header, IFD0 at offset 8
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08,
        // One entry: Orientation (0x0112), SHORT, count 1
        0x00, 0x01,
        0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, hi, lo, 0x00, 0x00,
        // No next IFD
        0x00, 0x00, 0x00, 0x00,
    ];

    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}
