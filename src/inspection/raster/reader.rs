use crate::inspection::common::error::Result;
use crate::inspection::raster::types::RgbFrame;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<RgbFrame>;
}
