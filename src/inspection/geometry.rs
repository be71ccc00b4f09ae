//! Inspection region geometry
//!
//! Regions are fixed proportions of the frame, not detected objects. The cap,
//! label and fill regions are analysed and must lie inside the frame. The two
//! alignment strips only carry the alignment verdict onto the overlay, so they
//! are clipped instead of rejected.

use std::fmt;

use tracing::debug;

use crate::inspection::common::error::{InspectionError, Result};

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// The whole frame.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.w as u64 <= width as u64
            && self.y as u64 + self.h as u64 <= height as u64
    }

    /// Zero area and out-of-frame regions are rejected.
    pub fn validate(&self, kind: RegionKind, width: u32, height: u32) -> Result<()> {
        if self.area() == 0 {
            return Err(InspectionError::Geometry { kind, region: *self });
        }
        if !self.fits_within(width, height) {
            return Err(InspectionError::OutOfBounds {
                kind,
                region: *self,
                width,
                height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Cap,
    Label,
    Fill,
    AlignmentUpper,
    AlignmentLower,
    Frame,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionKind::Cap => "cap",
            RegionKind::Label => "label",
            RegionKind::Fill => "fill",
            RegionKind::AlignmentUpper => "upper alignment",
            RegionKind::AlignmentLower => "lower alignment",
            RegionKind::Frame => "frame",
        };
        f.write_str(name)
    }
}

/// A region centred horizontally on the frame.
///
/// width = W / width_divisor + width_offset,
/// height = H / height_divisor + height_offset,
/// x = W / 2 - width / 2, y = H / top_divisor. All integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenteredRoi {
    pub width_divisor: u32,
    pub width_offset: i32,
    pub height_divisor: u32,
    pub height_offset: i32,
    pub top_divisor: u32,
}

impl CenteredRoi {
    fn derive(&self, kind: RegionKind, width: u32, height: u32) -> Result<Region> {
        let roi_width = div_or_zero(width, self.width_divisor) + self.width_offset as i64;
        let roi_height = div_or_zero(height, self.height_divisor) + self.height_offset as i64;
        let x = width as i64 / 2 - roi_width.max(0) / 2;
        let y = div_or_zero(height, self.top_divisor);

        let region = Region::new(
            clamp_u32(x),
            clamp_u32(y),
            clamp_u32(roi_width),
            clamp_u32(roi_height),
        );
        region.validate(kind, width, height)?;
        if x < 0 {
            return Err(InspectionError::OutOfBounds {
                kind,
                region,
                width,
                height,
            });
        }
        Ok(region)
    }
}

/// A fixed-size strip anchored at `(floor(W / x_divisor), floor(H / y_divisor))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStrip {
    pub x_divisor: f64,
    pub y_divisor: f64,
    pub width: u32,
    pub height: u32,
}

impl FixedStrip {
    fn derive(&self, kind: RegionKind, width: u32, height: u32) -> Result<Region> {
        let x = clamp_u32((width as f64 / self.x_divisor).floor() as i64).min(width);
        let y = clamp_u32((height as f64 / self.y_divisor).floor() as i64).min(height);
        let right = (x as u64 + self.width as u64).min(width as u64) as u32;
        let bottom = (y as u64 + self.height as u64).min(height as u64) as u32;

        let region = Region::new(x, y, right - x, bottom - y);
        if region.w != self.width || region.h != self.height {
            debug!("Clipped {} strip to {}", kind, region);
        }
        region.validate(kind, width, height)?;
        Ok(region)
    }
}

/// Proportional layout of every region on a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiLayout {
    pub cap: CenteredRoi,
    pub label: CenteredRoi,
    pub fill: CenteredRoi,
    pub alignment_upper: FixedStrip,
    pub alignment_lower: FixedStrip,
}

impl Default for RoiLayout {
    fn default() -> Self {
        Self {
            cap: CenteredRoi {
                width_divisor: 5,
                width_offset: 0,
                height_divisor: 8,
                height_offset: 5,
                top_divisor: 30,
            },
            label: CenteredRoi {
                width_divisor: 3,
                width_offset: 5,
                height_divisor: 2,
                height_offset: 0,
                top_divisor: 2,
            },
            fill: CenteredRoi {
                width_divisor: 6,
                width_offset: 0,
                height_divisor: 3,
                height_offset: -8,
                top_divisor: 3,
            },
            alignment_upper: FixedStrip {
                x_divisor: 2.9,
                y_divisor: 1.04,
                width: 110,
                height: 10,
            },
            alignment_lower: FixedStrip {
                x_divisor: 2.9,
                y_divisor: 1.62,
                width: 110,
                height: 10,
            },
        }
    }
}

/// All regions derived for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectionRegions {
    pub cap: Region,
    pub label: Region,
    pub fill: Region,
    pub alignment: [Region; 2],
}

impl RoiLayout {
    pub fn derive(&self, width: u32, height: u32) -> Result<InspectionRegions> {
        let regions = InspectionRegions {
            cap: self.cap.derive(RegionKind::Cap, width, height)?,
            label: self.label.derive(RegionKind::Label, width, height)?,
            fill: self.fill.derive(RegionKind::Fill, width, height)?,
            alignment: [
                self.alignment_upper
                    .derive(RegionKind::AlignmentUpper, width, height)?,
                self.alignment_lower
                    .derive(RegionKind::AlignmentLower, width, height)?,
            ],
        };
        debug!(
            cap = %regions.cap,
            label = %regions.label,
            fill = %regions.fill,
            "Derived inspection regions for {}x{}",
            width,
            height
        );
        Ok(regions)
    }
}

fn div_or_zero(value: u32, divisor: u32) -> i64 {
    value.checked_div(divisor).unwrap_or(0) as i64
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
