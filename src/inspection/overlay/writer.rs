use std::io::Write;

use image::RgbImage;

use crate::inspection::common::error::Result;
use crate::inspection::overlay::types::OverlayConfig;

pub trait OverlayWriter {
    fn write_overlay(&self, image: &RgbImage, output: &mut dyn Write, config: &OverlayConfig) -> Result<()>;
}
