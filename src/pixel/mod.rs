//! Pixel model and pixel sources
//!
//! A [`Pixel`] is an immutable RGB triple. The producer reads pixels from a
//! [`PixelSource`] in row-major order (`y` outer, `x` inner) and wraps each one
//! in a [`PixelSample`] that remembers where it came from, so every report can
//! be traced back to a position in the source.

mod error;
mod image_source;
mod source;

pub use error::{SourceError, SourceResult};
pub use image_source::ImageSource;
pub use source::{PixelGrid, PixelSource};

use serde::Serialize;
use std::fmt;

/// An RGB color sample with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a pixel from a packed `0x??RRGGBB` value, ignoring the top byte
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.r, self.g, self.b)
    }
}

/// A pixel together with its position in the source
///
/// Ordering schemes only ever look at `pixel`; the position is carried along so
/// consumers can prove that each source position was reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub pixel: Pixel,
}

impl PixelSample {
    pub const fn new(x: u32, y: u32, pixel: Pixel) -> Self {
        Self { x, y, pixel }
    }

    pub const fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

impl fmt::Display for PixelSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pixel, f)
    }
}
