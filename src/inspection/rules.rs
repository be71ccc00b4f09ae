//! Defect decision rules
//!
//! Each defect dimension is an ordered [`DecisionTable`]: the first rule whose
//! predicate holds decides the status, otherwise the table's fallback does.
//! Bands overlap on purpose, so rule order is part of the calibration.

mod status;
mod table;
mod cap;
mod label;
mod fill;
mod alignment;


pub use status::{DefectDimension, DefectStatus, DisplayColor};
pub use table::{DecisionRule, DecisionTable};
pub use cap::{CAP_MISSING, CAP_PRESENT, CapMetrics, cap_presence_table};
pub use label::{LABEL_MISSING, LABEL_OK, LabelMetrics, PRINTING_DEFECT, label_condition_table};
pub use fill::{EMPTY, FillMetrics, OVERFILLED, PROPERLY_FILLED, UNDERFILLED, fill_level_table};
pub use alignment::{
    AlignmentMetrics, MISALIGNED, PROPERLY_ALIGNED, label_alignment_table,
};

use crate::inspection::config::InspectionConfig;

/// The four decision tables built from one configuration.
#[derive(Debug)]
pub struct RuleBook {
    pub cap: DecisionTable<CapMetrics>,
    pub label: DecisionTable<LabelMetrics>,
    pub fill: DecisionTable<FillMetrics>,
    pub alignment: DecisionTable<AlignmentMetrics>,
}

impl RuleBook {
    pub fn from_config(config: &InspectionConfig) -> Self {
        Self {
            cap: cap_presence_table(&config.cap),
            label: label_condition_table(&config.label),
            fill: fill_level_table(&config.fill),
            alignment: label_alignment_table(&config.alignment),
        }
    }
}
