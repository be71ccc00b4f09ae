//! Raster data types

use image::RgbImage;

use crate::inspection::common::error::{InspectionError, Result};
use crate::inspection::geometry::Region;

/// One pixel as `[r, g, b]`.
pub type Rgb = [u8; 3];

/// Bytes per pixel in every raster the core reads.
pub const CHANNELS: usize = 3;

/// Read-only access to a packed RGB8 image.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Packed bytes of row `y`, exactly `width * 3` long.
    fn row(&self, y: u32) -> &[u8];

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        let row = self.row(y);
        let offset = x as usize * CHANNELS;
        [row[offset], row[offset + 1], row[offset + 2]]
    }
}

/// Owned RGB frame, one bottle per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
///
/// Built only through [`RgbFrame::new`], [`RgbFrame::filled`] or an
/// `RgbImage`, so `data` always holds `width * height * 3` bytes.
pub struct RgbFrame {
    width: u32,
    height: u32,
    /// Interleaved pixel data [R, G, B, R, G, B, ...]
    data: Vec<u8>,
}

impl RgbFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != width as usize * height as usize * CHANNELS {
            return Err(InspectionError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self { width, height, data }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&color);
    }

    /// Paints `region` solid. The region must already lie inside the frame.
    pub fn fill_region(&mut self, region: &Region, color: Rgb) {
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or(InspectionError::InvalidDimensions(self.width, self.height))
    }
}

impl From<RgbImage> for RgbFrame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

impl Raster for RgbFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

impl Raster for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn row(&self, y: u32) -> &[u8] {
        let stride = self.dimensions().0 as usize * CHANNELS;
        let start = y as usize * stride;
        &self.as_raw()[start..start + stride]
    }
}
