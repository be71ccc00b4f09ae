//! Frame reader backed by the `image` crate.
//!
//! Handles whatever formats the crate was built with (PNG and JPEG here). Frames
//! with alpha or a single grey channel are converted to RGB8 so the classifier
//! always sees three channels.

use tracing::debug;

use crate::inspection::common::error::{InspectionError, Result};
use crate::inspection::raster::reader::FrameReader;
use crate::inspection::raster::types::RgbFrame;

pub struct ImageFrameReader;

impl FrameReader for ImageFrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<RgbFrame> {
        debug!("Decoding frame, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| InspectionError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded frame: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(RgbFrame::from(decoded.to_rgb8()))
    }
}
