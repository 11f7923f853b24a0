//! Common test utilities and helpers
//!
//! Image fixtures written to temporary directories plus deterministic
//! in-memory pixel grids.

#![allow(dead_code)]

use pixel_priority::pixel::{Pixel, PixelGrid};
use std::path::{Path, PathBuf};

pub const RED: Pixel = Pixel::new(255, 0, 0);
pub const GREEN: Pixel = Pixel::new(0, 255, 0);
pub const BLUE: Pixel = Pixel::new(0, 0, 255);
pub const GREY: Pixel = Pixel::new(10, 10, 10);

/// Write a PNG whose pixels come from `pixel` and return its path
pub fn write_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> Pixel,
) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_fn(width, height, |x, y| image::Rgb(pixel(x, y).channels()))
        .save(&path)
        .unwrap();
    path
}

/// The four-pixel row used by the ordering scenarios
pub fn write_primaries_png(dir: &Path) -> PathBuf {
    let row = [RED, GREEN, BLUE, GREY];
    write_png(dir, "primaries.png", 4, 1, |x, _| row[x as usize])
}

/// Deterministic pseudo-random grid
pub fn random_grid(seed: u64, width: u32, height: u32) -> PixelGrid {
    let mut state = seed.max(1);
    let pixels = (0..(width * height))
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            Pixel::from_packed(state as u32)
        })
        .collect();
    PixelGrid::new(width, height, pixels).unwrap()
}
