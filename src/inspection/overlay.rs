//! Overlay output module
//!
//! Paints the inspected regions onto a copy of the frame and encodes the
//! result for human review.

mod writer;
mod tiff_writer;
mod paint;
pub mod types;

pub use writer::OverlayWriter;
pub use tiff_writer::TiffOverlayWriter;
pub use paint::paint_overlay;
pub use types::{OverlayCompression, OverlayConfig};
