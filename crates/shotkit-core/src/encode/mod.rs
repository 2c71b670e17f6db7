//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding RGB and RGBA images to PNG with maximum lossless compression
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use shotkit_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, encode_png_image, encode_png_with_layout, EncodeError};

/// Mime type of every encoded rendition.
pub const PNG_MIME_TYPE: &str = "image/png";
