//! Bottle inspection module
//!
//! Region-based pixel classification for bottling-line frames. The engine
//! derives fixed regions from the frame size, counts colour classes in each,
//! and runs the counts through ordered decision tables to flag a missing cap,
//! a missing or defective label, a wrong fill level and a misaligned label.
//! Decoding, overlay encoding and folder handling sit around it as adapters.

pub mod common;
pub mod classify;
pub mod geometry;
pub mod statistics;
pub mod config;
pub mod rules;
pub mod report;
pub mod engine;
pub mod raster;
pub mod overlay;
pub mod batch;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use common::{
    InspectionError,
    Result,
};

pub use classify::{
    ColorClass,
    PixelCategory,
    is_black,
    is_dark,
    is_red,
    is_white,
};

pub use geometry::{
    CenteredRoi,
    FixedStrip,
    InspectionRegions,
    Region,
    RegionKind,
    RoiLayout,
};

pub use statistics::RegionStatistics;

pub use config::{
    AlignmentBands,
    CapBands,
    ClassThresholds,
    FillBands,
    InspectionConfig,
    InspectionConfigBuilder,
    LabelBands,
    OpenInterval,
};

pub use rules::{
    DecisionTable,
    DefectDimension,
    DefectStatus,
    DisplayColor,
    RuleBook,
};

pub use report::{IssueReport, NO_ISSUE};

pub use engine::{Finding, InspectionOutcome, Inspector};

pub use raster::{
    FrameReader,
    ImageFrameReader,
    Raster,
    Rgb,
    RgbFrame,
};

pub use overlay::{
    OverlayCompression,
    OverlayConfig,
    OverlayWriter,
    TiffOverlayWriter,
};

pub use pipeline::{ImageInspection, InspectionPipeline};
