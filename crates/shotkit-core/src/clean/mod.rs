//! The fixed "auto-clean" transform.
//!
//! ## Stage Order
//! 1. Bounding resize (never upscales)
//! 2. Normalize (per-channel percentile stretch)
//! 3. Gamma
//! 4. Modulate (brightness, then saturation)
//! 5. Despeckle (median)
//! 6. Sharpen (unsharp mask)
//!
//! Orientation is normalized at decode time, before stage 1. The order is
//! fixed; reordering changes the output bytes.
//!
//! Every constant is fixed in [`AutoCleanPolicy::STANDARD`]. The policy is
//! serializable so callers can record exactly what was applied.

mod despeckle;
mod histogram;
mod sharpen;
mod tone;

pub use despeckle::median_filter;
pub use histogram::{compute_channel_histograms, ChannelHistograms};
pub use sharpen::sharpen;
pub use tone::{apply_gamma, gamma_lut, modulate, normalize};

use serde::Serialize;

use crate::decode::{resize_within, DecodedImage};
use crate::encode::EncodeError;

/// Constants of the auto-clean transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutoCleanPolicy {
    max_edge: u32,
    normalize_low_percentile: f32,
    normalize_high_percentile: f32,
    gamma: f32,
    brightness: f32,
    saturation: f32,
    median_radius: u32,
    sharpen_sigma: f32,
}

impl AutoCleanPolicy {
    /// The one policy `preprocess` applies.
    pub const STANDARD: AutoCleanPolicy = AutoCleanPolicy {
        max_edge: 2048,
        normalize_low_percentile: 1.0,
        normalize_high_percentile: 99.0,
        gamma: 1.05,
        brightness: 1.03,
        saturation: 1.03,
        median_radius: 1,
        sharpen_sigma: 1.0,
    };

    /// Longest allowed edge after the bounding resize.
    pub fn max_edge(&self) -> u32 {
        self.max_edge
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn median_radius(&self) -> u32 {
        self.median_radius
    }

    pub fn sharpen_sigma(&self) -> f32 {
        self.sharpen_sigma
    }
}

/// Run the auto-clean stages on an already oriented image.
///
/// # Errors
///
/// Returns `EncodeError::Transform` if an intermediate image is malformed.
pub fn auto_clean(image: &DecodedImage, policy: &AutoCleanPolicy) -> Result<DecodedImage, EncodeError> {
    let bounded = resize_within(image, policy.max_edge)
        .map_err(|e| EncodeError::Transform(e.to_string()))?;
    tracing::debug!(
        width = bounded.width,
        height = bounded.height,
        "bounding resize done"
    );

    let normalized = normalize(
        &bounded,
        policy.normalize_low_percentile,
        policy.normalize_high_percentile,
    );
    let corrected = apply_gamma(&normalized, policy.gamma);
    let modulated = modulate(&corrected, policy.brightness, policy.saturation);
    tracing::debug!("tonal stages done");

    let despeckled = median_filter(&modulated, policy.median_radius);
    let sharpened = sharpen(&despeckled, policy.sharpen_sigma)?;
    tracing::debug!("despeckle and sharpen done");

    Ok(sharpened)
}
