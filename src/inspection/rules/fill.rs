use crate::inspection::classify::PixelCategory;
use crate::inspection::config::FillBands;
use crate::inspection::rules::status::{DefectDimension, DefectStatus, DisplayColor};
use crate::inspection::rules::table::DecisionTable;
use crate::inspection::statistics::RegionStatistics;

pub const OVERFILLED: &str = "Overfilled";
pub const PROPERLY_FILLED: &str = "Properly Filled";
pub const UNDERFILLED: &str = "Underfilled";
pub const EMPTY: &str = "Empty";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillMetrics {
    /// Dark pixels over fill region area
    pub fill_ratio: f64,
}

impl FillMetrics {
    pub fn from_statistics(statistics: &RegionStatistics) -> Self {
        Self {
            fill_ratio: statistics.ratio(PixelCategory::Dark),
        }
    }
}

pub fn fill_level_table(bands: &FillBands) -> DecisionTable<FillMetrics> {
    let FillBands {
        overfilled_above,
        proper_above,
        proper_max,
        underfilled_above,
        underfilled_max,
    } = *bands;

    DecisionTable::new(
        DefectDimension::FillLevel,
        DefectStatus::new(EMPTY, DisplayColor::Blue),
    )
    .rule(
        DefectStatus::new(OVERFILLED, DisplayColor::Red),
        move |m: &FillMetrics| m.fill_ratio > overfilled_above,
    )
    .rule(
        DefectStatus::new(PROPERLY_FILLED, DisplayColor::Green),
        move |m: &FillMetrics| proper_above < m.fill_ratio && m.fill_ratio <= proper_max,
    )
    .rule(
        DefectStatus::new(UNDERFILLED, DisplayColor::Orange),
        move |m: &FillMetrics| {
            underfilled_above < m.fill_ratio && m.fill_ratio <= underfilled_max
        },
    )
}
