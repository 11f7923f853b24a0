//! Pixel source backed by a decoded image file

use crate::pixel::error::{SourceError, SourceResult};
use crate::pixel::source::PixelSource;
use crate::pixel::Pixel;
use image::RgbImage;
use std::path::Path;

/// Decoded RGB image
///
/// Any format the `image` crate can guess from the file contents is accepted;
/// alpha and higher bit depths are flattened to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct ImageSource {
    image: RgbImage,
}

impl ImageSource {
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes).map_err(|source| SourceError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!(
            "Decoded {} as {}x{} image",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Self {
            image: decoded.to_rgb8(),
        })
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        Self { image }
    }
}

impl PixelSource for ImageSource {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        self.image
            .get_pixel_checked(x, y)
            .map(|rgb| Pixel::from(rgb.0))
            .ok_or(SourceError::OutOfRange {
                x,
                y,
                width: self.image.width(),
                height: self.image.height(),
            })
    }
}
