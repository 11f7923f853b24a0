//! Key functions for the three ordering schemes

use crate::pixel::Pixel;

/// `RRGGBB` packed as an unsigned 24-bit integer
///
/// Comparing these keys is the same as comparing red, then green, then blue.
pub fn lexicographic_key(pixel: &Pixel) -> u32 {
    (u32::from(pixel.r) << 16) | (u32::from(pixel.g) << 8) | u32::from(pixel.b)
}

/// Squared length of the RGB vector
pub fn squared_norm(pixel: &Pixel) -> u32 {
    pixel
        .channels()
        .iter()
        .map(|&channel| u32::from(channel) * u32::from(channel))
        .sum()
}

/// Euclidean length of the RGB vector, `sqrt(r² + g² + b²)`
pub fn euclidean_norm(pixel: &Pixel) -> f64 {
    f64::from(squared_norm(pixel)).sqrt()
}

/// 24-bit code interleaving channel bits from most to least significant
///
/// Layout: `r7 g7 b7 r6 g6 b6 ... r0 g0 b0`, with `r7` as bit 23.
pub fn bit_interleave_key(pixel: &Pixel) -> u32 {
    (0..8).rev().fold(0u32, |code, bit| {
        let r = u32::from(pixel.r >> bit) & 1;
        let g = u32::from(pixel.g >> bit) & 1;
        let b = u32::from(pixel.b >> bit) & 1;
        (code << 3) | (r << 2) | (g << 1) | b
    })
}
