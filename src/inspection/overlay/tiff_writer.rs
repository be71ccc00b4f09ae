use std::io::Write;

use image::RgbImage;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, colortype};
use tracing::debug;

use crate::inspection::common::error::{InspectionError, Result};
use crate::inspection::overlay::types::{OverlayCompression, OverlayConfig};
use crate::inspection::overlay::writer::OverlayWriter;

pub struct TiffOverlayWriter;

impl OverlayWriter for TiffOverlayWriter {
    fn write_overlay(&self, image: &RgbImage, output: &mut dyn Write, config: &OverlayConfig) -> Result<()> {
        let (width, height) = image.dimensions();
        debug!("Encoding overlay TIFF: {}x{}", width, height);

        let compression = match config.compression {
            OverlayCompression::None => Compression::Uncompressed,
            OverlayCompression::Lzw => Compression::Lzw,
            OverlayCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            OverlayCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            OverlayCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| InspectionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder
            .write_image::<colortype::RGB8>(width, height, image.as_raw())
            .map_err(|e| InspectionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Overlay encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
