use std::path::Path;

use anyhow::Context;
use image::RgbImage;
use mpx_core::format::Color;
use mpx_core::index::PixelSource;

/// A decoded raster file exposed as a pixel source for the encoder.
pub struct ImageSource {
    image: RgbImage,
}

impl ImageSource {
    /// Load and fully decode one frame. Any format the `image` crate
    /// recognizes works; pixels are flattened to 8-bit RGB.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to read {}", path.display()))?
            .to_rgb8();
        Ok(Self { image })
    }
}

impl PixelSource for ImageSource {
    fn width(&self) -> u16 {
        self.image.width() as u16
    }

    fn height(&self) -> u16 {
        self.image.height() as u16
    }

    fn pixel_at(&self, x: u16, y: u16) -> Color {
        let p = self.image.get_pixel(x as u32, y as u32);
        Color::new(p[0], p[1], p[2])
    }
}
