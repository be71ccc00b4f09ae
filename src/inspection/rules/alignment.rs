//! Label alignment is judged on the colour mix of the whole frame, not on the
//! two strips it is drawn on.

use crate::inspection::classify::PixelCategory;
use crate::inspection::config::AlignmentBands;
use crate::inspection::rules::status::{DefectDimension, DefectStatus, DisplayColor};
use crate::inspection::rules::table::DecisionTable;
use crate::inspection::statistics::RegionStatistics;

pub const PROPERLY_ALIGNED: &str = "Properly Aligned";
pub const MISALIGNED: &str = "Misaligned";

/// Shares of red, black and white among pixels matching any of the three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentMetrics {
    pub classified: u64,
    pub red_share: f64,
    pub black_share: f64,
    pub white_share: f64,
}

impl AlignmentMetrics {
    pub fn from_statistics(statistics: &RegionStatistics) -> Self {
        Self {
            classified: statistics.classified_total(),
            red_share: statistics.share(PixelCategory::Red),
            black_share: statistics.share(PixelCategory::Black),
            white_share: statistics.share(PixelCategory::White),
        }
    }
}

pub fn label_alignment_table(bands: &AlignmentBands) -> DecisionTable<AlignmentMetrics> {
    let bands = *bands;
    let misaligned = DefectStatus::new(MISALIGNED, DisplayColor::Red);

    DecisionTable::new(DefectDimension::LabelAlignment, misaligned)
        // nothing classified: no shares to compare
        .rule(misaligned, |m: &AlignmentMetrics| m.classified == 0)
        .rule(
            DefectStatus::new(PROPERLY_ALIGNED, DisplayColor::Green),
            move |m: &AlignmentMetrics| {
                bands.red.contains(m.red_share)
                    && bands.black.contains(m.black_share)
                    && bands.white.contains(m.white_share)
            },
        )
}
