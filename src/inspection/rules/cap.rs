use crate::inspection::classify::PixelCategory;
use crate::inspection::config::CapBands;
use crate::inspection::rules::status::{DefectDimension, DefectStatus, DisplayColor};
use crate::inspection::rules::table::DecisionTable;
use crate::inspection::statistics::RegionStatistics;

pub const CAP_PRESENT: &str = "Cap Present";
pub const CAP_MISSING: &str = "Cap Missing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapMetrics {
    pub red_pixels: u64,
}

impl CapMetrics {
    pub fn from_statistics(statistics: &RegionStatistics) -> Self {
        Self {
            red_pixels: statistics.count(PixelCategory::Red),
        }
    }
}

pub fn cap_presence_table(bands: &CapBands) -> DecisionTable<CapMetrics> {
    let min_red_pixels = bands.min_red_pixels;

    DecisionTable::new(
        DefectDimension::CapPresence,
        DefectStatus::new(CAP_MISSING, DisplayColor::Red),
    )
    .rule(
        DefectStatus::new(CAP_PRESENT, DisplayColor::Green),
        move |m: &CapMetrics| m.red_pixels > min_red_pixels,
    )
}
