//! Shotkit Core - deterministic raster pipeline
//!
//! This crate turns a caller-supplied raster image into:
//! - a normalized PNG via [`preprocess`] (auto-orient, bound, tone, denoise, sharpen)
//! - a ZIP of fixed-size social/marketplace renditions via [`build_crop_pack`]
//!
//! Both paths are pure functions of their input bytes: the same input always
//! produces the same output bytes.

pub mod clean;
pub mod crop_pack;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod preprocess;
pub mod transform;

#[cfg(test)]
mod test_support;

use thiserror::Error;

pub use clean::AutoCleanPolicy;
pub use crop_pack::{
    build_crop_pack, crop_pack_filename, sanitize_prefix, write_crop_pack, ConfigError, CropCatalog,
    CropPackStream, CropPackager, EncodedOutput, OutputSpec, CROP_PACK_CONTENT_TYPE,
};
pub use decode::{DecodeError, DecodedImage, PixelLayout};
pub use encode::EncodeError;
pub use preprocess::{preprocess, PreprocessResult};

/// Any failure of a pipeline entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The input bytes are not a decodable raster image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A transform, encode or archive step failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The crop catalog is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
