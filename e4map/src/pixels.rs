//! Seam between the segmenter and whatever decodes image assets.

use crate::error::AssetError;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::Path;

/// A readable grid of RGBA pixels.
pub trait PixelSource {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// RGBA value at `(x, y)`. Callers stay inside `dimensions()`.
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// Decodes an image file into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    log::info!("Loading image from {:?}", path);
    let img = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => AssetError::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(img.to_rgba8())
}
