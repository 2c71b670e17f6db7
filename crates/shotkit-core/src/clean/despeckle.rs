//! Median-filter despeckling.

use crate::decode::DecodedImage;

/// Apply a per-channel median filter (alpha included) with a square window of
/// `(2 * radius + 1)^2` pixels.
///
/// Pixels outside the image are replaced by the nearest edge pixel, so the
/// output has the same dimensions as the input. Radius 0 returns a copy.
pub fn median_filter(image: &DecodedImage, radius: u32) -> DecodedImage {
    if radius == 0 || image.is_empty() {
        return image.clone();
    }

    let (width, height) = (image.width as i64, image.height as i64);
    let channels = image.channels();
    let r = radius as i64;
    let side = (2 * radius + 1) as usize;
    let mid = side * side / 2;

    let mut window = vec![0u8; side * side];
    let mut pixels = vec![0u8; image.pixels.len()];

    for y in 0..height {
        for x in 0..width {
            let dst = (y * width + x) as usize * channels;

            for channel in 0..channels {
                let mut i = 0;
                for dy in -r..=r {
                    let sy = (y + dy).clamp(0, height - 1);
                    for dx in -r..=r {
                        let sx = (x + dx).clamp(0, width - 1);
                        window[i] = image.pixels[(sy * width + sx) as usize * channels + channel];
                        i += 1;
                    }
                }
                let (_, median, _) = window.select_nth_unstable(mid);
                pixels[dst + channel] = *median;
            }
        }
    }

    DecodedImage {
        width: image.width,
        height: image.height,
        pixels,
        layout: image.layout,
    }
}
