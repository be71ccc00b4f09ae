use crate::inspection::classify::PixelCategory;
use crate::inspection::config::LabelBands;
use crate::inspection::rules::status::{DefectDimension, DefectStatus, DisplayColor};
use crate::inspection::rules::table::DecisionTable;
use crate::inspection::statistics::RegionStatistics;

pub const LABEL_MISSING: &str = "Label Missing";
pub const PRINTING_DEFECT: &str = "Possible Printing Defect";
pub const LABEL_OK: &str = "Label is OK";

/// Category ratios over the label region area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub red_ratio: f64,
    pub white_ratio: f64,
    pub black_ratio: f64,
}

impl LabelMetrics {
    pub fn from_statistics(statistics: &RegionStatistics) -> Self {
        Self {
            red_ratio: statistics.ratio(PixelCategory::Red),
            white_ratio: statistics.ratio(PixelCategory::White),
            black_ratio: statistics.ratio(PixelCategory::Black),
        }
    }
}

pub fn label_condition_table(bands: &LabelBands) -> DecisionTable<LabelMetrics> {
    let LabelBands {
        missing_white_above,
        missing_black_above,
        missing_red_below,
        defect_black_above,
        defect_white_above,
    } = *bands;

    DecisionTable::new(
        DefectDimension::LabelCondition,
        DefectStatus::new(LABEL_OK, DisplayColor::Blue),
    )
    .rule(
        DefectStatus::new(LABEL_MISSING, DisplayColor::Red),
        move |m: &LabelMetrics| {
            m.white_ratio > missing_white_above
                || m.black_ratio > missing_black_above
                || m.red_ratio < missing_red_below
        },
    )
    .rule(
        DefectStatus::new(PRINTING_DEFECT, DisplayColor::Orange),
        move |m: &LabelMetrics| {
            m.black_ratio > defect_black_above || m.white_ratio > defect_white_above
        },
    )
}
