//! Per-channel histograms used by contrast normalization.

use crate::decode::PixelLayout;

/// 256-bin histograms for each RGB channel.
#[derive(Debug, Clone)]
pub struct ChannelHistograms {
    /// Red, green and blue bins, in that order.
    pub channels: [[u32; 256]; 3],
    /// Number of pixels counted.
    pub total: u64,
}

impl Default for ChannelHistograms {
    fn default() -> Self {
        Self {
            channels: [[0; 256]; 3],
            total: 0,
        }
    }
}

impl ChannelHistograms {
    /// Value at the given percentile (0-100) of one channel.
    ///
    /// Uses the nearest-rank over sorted samples: the sample at index
    /// `round((total - 1) * pct / 100)`. Returns 0 for an empty histogram.
    pub fn percentile(&self, channel: usize, pct: f32) -> u8 {
        if self.total == 0 {
            return 0;
        }

        let pct = pct.clamp(0.0, 100.0) as f64;
        let rank = ((self.total - 1) as f64 * pct / 100.0).round() as u64;

        let mut cumulative = 0u64;
        for (value, &count) in self.channels[channel].iter().enumerate() {
            cumulative += count as u64;
            if cumulative > rank {
                return value as u8;
            }
        }
        255
    }
}

/// Compute per-channel histograms of the color channels.
///
/// Single pass, O(n) in the number of pixels. A trailing partial pixel is
/// ignored. For RGBA data, fully transparent pixels are not counted: their
/// color is invisible and often arbitrary.
pub fn compute_channel_histograms(pixels: &[u8], layout: PixelLayout) -> ChannelHistograms {
    let mut hist = ChannelHistograms::default();

    for chunk in pixels.chunks_exact(layout.channels()) {
        if layout.has_alpha() && chunk[3] == 0 {
            continue;
        }
        hist.channels[0][chunk[0] as usize] += 1;
        hist.channels[1][chunk[1] as usize] += 1;
        hist.channels[2][chunk[2] as usize] += 1;
        hist.total += 1;
    }

    hist
}
