//! Geometric transforms shared by both pipelines.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixel coordinates
//! - Origin is the top-left corner
//!
//! Orientation correction lives in [`crate::decode`] because it is driven
//! by metadata read at decode time.

mod crop;

pub use crop::{apply_crop, cover_crop_rect, CropRect};
