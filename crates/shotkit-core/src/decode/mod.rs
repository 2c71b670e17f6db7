//! Image decoding and resizing.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP images from bytes
//! - Normalizing EXIF orientation so stored pixels match display
//! - Keeping an alpha channel when the source has one
//! - Bounded (never upscaling) and cover-fit resizing
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use shotkit_core::decode::{decode_image, resize_within};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let bounded = resize_within(&image, 2048).unwrap();
//! println!("Bounded to {}x{}", bounded.width, bounded.height);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::decode_image;
pub use resize::{resize, resize_to_cover, resize_within};
pub use types::{DecodeError, DecodedImage, Orientation, PixelLayout};
