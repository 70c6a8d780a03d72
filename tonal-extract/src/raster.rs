use image::{DynamicImage, GenericImageView, RgbaImage};
use tonal_core::{Color, Error, Result};

/// A decoded image addressable per pixel as 8-bit RGBA.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Callers must keep `x < width()` and `y < height()`; implementations
    /// may panic otherwise.
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];

    fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

impl<R: Raster + ?Sized> Raster for &R {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        (**self).pixel(x, y)
    }
}

impl Raster for RgbaImage {
    fn width(&self) -> u32 {
        RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbaImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

impl Raster for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        GenericImageView::get_pixel(self, x, y).0
    }
}

/// Row-major RGBA bytes with known dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| Error::InvalidImage(format!("{width}x{height} is too large")))?;
        if data.len() != expected {
            return Err(Error::InvalidImage(format!(
                "{width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let data = colors.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect();
        Self::new(width, height, data)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Error::InvalidImage(format!("{width}x{height} is too large")))?;
        Self::from_colors(width, height, &vec![color; count])
    }
}

impl Raster for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}
