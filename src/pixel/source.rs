//! The pixel source seam and an in-memory implementation

use crate::pixel::error::{SourceError, SourceResult};
use crate::pixel::Pixel;

/// Supplier of pixels addressed by `(x, y)`
///
/// Implementations must fail with [`SourceError::OutOfRange`] for any
/// coordinate outside `0..width` x `0..height`. The producer walks a source in
/// row-major order: row 0 left to right, then row 1, and so on.
pub trait PixelSource: Send {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel>;

    /// Total number of pixels (`width * height`)
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Map a row-major index onto its `(x, y)` position
    ///
    /// Returns `None` when the index is past the end of the source.
    fn position_of(&self, index: usize) -> Option<(u32, u32)> {
        let width = self.width() as usize;
        if width == 0 || index >= self.pixel_count() {
            return None;
        }
        Some(((index % width) as u32, (index / width) as u32))
    }
}

impl<S: PixelSource + ?Sized> PixelSource for Box<S> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        (**self).pixel_at(x, y)
    }

    fn pixel_count(&self) -> usize {
        (**self).pixel_count()
    }
}

/// Row-major in-memory grid of pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Create a grid from row-major pixels; `pixels.len()` must equal `width * height`
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> SourceResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SourceError::Dimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a grid from rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> SourceResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        let pixels: Vec<Pixel> = rows.into_iter().flatten().collect();
        Self::new(width, height, pixels)
    }

    /// A single-row grid, handy for feeding an exact pixel sequence
    pub fn from_row(pixels: Vec<Pixel>) -> Self {
        let width = pixels.len() as u32;
        let height = if pixels.is_empty() { 0 } else { 1 };
        Self {
            width,
            height,
            pixels,
        }
    }

    /// An empty 0x0 grid
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

impl PixelSource for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        if x >= self.width || y >= self.height {
            return Err(SourceError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.pixels[y as usize * self.width as usize + x as usize])
    }

    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}
