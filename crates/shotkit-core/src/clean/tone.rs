//! Tonal stages: contrast normalization, gamma and modulation.
//!
//! Each stage returns a new image. Normalization and gamma are pure
//! per-channel lookups; modulation mixes channels through luminance.

use super::histogram::compute_channel_histograms;
use crate::decode::DecodedImage;
use crate::luminance::calculate_luminance;

type ChannelLuts = [[u8; 256]; 3];

/// Stretch each channel so its `[low_pct, high_pct]` percentile range maps
/// onto `0..=255`.
///
/// Channels whose range collapses (`high <= low`) pass through unchanged.
pub fn normalize(image: &DecodedImage, low_pct: f32, high_pct: f32) -> DecodedImage {
    let hist = compute_channel_histograms(&image.pixels, image.layout);
    let mut luts = identity_luts();

    for (channel, lut) in luts.iter_mut().enumerate() {
        let low = hist.percentile(channel, low_pct);
        let high = hist.percentile(channel, high_pct);
        if high > low {
            *lut = stretch_lut(low, high);
        }
    }

    apply_luts(image, &luts)
}

/// Build a lookup table mapping `low..=high` linearly onto `0..=255`.
fn stretch_lut(low: u8, high: u8) -> [u8; 256] {
    let (low, span) = (low as u32, (high - low) as u32);
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let v = v as u32;
        *out = if v <= low {
            0
        } else if v >= low + span {
            255
        } else {
            (((v - low) * 255 + span / 2) / span) as u8
        };
    }
    lut
}

/// Build the gamma lookup table: `out = 255 * (in / 255)^(1 / gamma)`.
///
/// Gamma above 1 brightens midtones; 0 and 255 are fixed points.
pub fn gamma_lut(gamma: f32) -> [u8; 256] {
    let exponent = 1.0 / gamma.max(f32::EPSILON) as f64;
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let normalized = v as f64 / 255.0;
        *out = (normalized.powf(exponent) * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply a fixed gamma to every channel.
pub fn apply_gamma(image: &DecodedImage, gamma: f32) -> DecodedImage {
    let lut = gamma_lut(gamma);
    apply_luts(image, &[lut; 3])
}

/// Scale brightness, then push each channel away from (or toward) its
/// BT.709 luminance by `saturation`.
///
/// A factor of 1.0 leaves the respective property unchanged.
pub fn modulate(image: &DecodedImage, brightness: f32, saturation: f32) -> DecodedImage {
    let mut pixels = image.pixels.clone();

    for chunk in pixels.chunks_exact_mut(image.channels()) {
        let r = chunk[0] as f32 * brightness;
        let g = chunk[1] as f32 * brightness;
        let b = chunk[2] as f32 * brightness;

        let lum = calculate_luminance(r, g, b);
        chunk[0] = to_u8(lum + (r - lum) * saturation);
        chunk[1] = to_u8(lum + (g - lum) * saturation);
        chunk[2] = to_u8(lum + (b - lum) * saturation);
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels,
        layout: image.layout,
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn identity_luts() -> ChannelLuts {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = v as u8;
    }
    [lut; 3]
}

fn apply_luts(image: &DecodedImage, luts: &ChannelLuts) -> DecodedImage {
    let mut pixels = image.pixels.clone();
    // Alpha, when present, passes through untouched
    for px in pixels.chunks_exact_mut(image.channels()) {
        px[0] = luts[0][px[0] as usize];
        px[1] = luts[1][px[1] as usize];
        px[2] = luts[2][px[2] as usize];
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels,
        layout: image.layout,
    }
}
