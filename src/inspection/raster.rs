//! Raster input module
//!
//! The core only ever sees a [`Raster`]; decoding files into one is the job of a
//! [`FrameReader`].

mod reader;
mod image_reader;
pub mod types;

pub use reader::FrameReader;
pub use image_reader::ImageFrameReader;
pub use types::{Raster, Rgb, RgbFrame, CHANNELS};
