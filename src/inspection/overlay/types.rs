//! Overlay configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayConfig {
    pub compression: OverlayCompression,
    /// Outline thickness in pixels, drawn inward from the region edge
    pub outline_width: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            compression: OverlayCompression::DeflateBalanced,
            outline_width: 3,
        }
    }
}
