//! Inspection configuration types
//!
//! Every threshold the engine uses lives here so a line can be recalibrated
//! without touching the rules. `Default` carries the calibrated values.

use crate::inspection::classify::{
    ColorClass, DEFAULT_BLACK_THRESHOLD, DEFAULT_DARK_THRESHOLD, DEFAULT_RED_THRESHOLD,
    DEFAULT_WHITE_THRESHOLD,
};
use crate::inspection::geometry::RoiLayout;

/// Colour classes used by each analyser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassThresholds {
    pub cap_red: ColorClass,
    pub label_red: ColorClass,
    pub label_white: ColorClass,
    pub label_black: ColorClass,
    pub fill_dark: ColorClass,
    /// Stricter red used for the whole-frame alignment check
    pub alignment_red: ColorClass,
    pub alignment_black: ColorClass,
    pub alignment_white: ColorClass,
}

impl Default for ClassThresholds {
    fn default() -> Self {
        Self {
            cap_red: ColorClass::red(DEFAULT_RED_THRESHOLD),
            label_red: ColorClass::red(DEFAULT_RED_THRESHOLD),
            label_white: ColorClass::white(DEFAULT_WHITE_THRESHOLD),
            label_black: ColorClass::black(DEFAULT_BLACK_THRESHOLD),
            fill_dark: ColorClass::dark(DEFAULT_DARK_THRESHOLD),
            alignment_red: ColorClass::Red {
                red_above: 150,
                others_below: 100,
            },
            alignment_black: ColorClass::black(DEFAULT_BLACK_THRESHOLD),
            alignment_white: ColorClass::white(DEFAULT_WHITE_THRESHOLD),
        }
    }
}

/// Cap presence: absolute red pixel count, so it scales with frame size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapBands {
    pub min_red_pixels: u64,
}

impl Default for CapBands {
    fn default() -> Self {
        Self { min_red_pixels: 500 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBands {
    pub missing_white_above: f64,
    pub missing_black_above: f64,
    pub missing_red_below: f64,
    pub defect_black_above: f64,
    pub defect_white_above: f64,
}

impl Default for LabelBands {
    fn default() -> Self {
        Self {
            missing_white_above: 0.4,
            missing_black_above: 0.4,
            missing_red_below: 0.01,
            defect_black_above: 0.2,
            defect_white_above: 0.1,
        }
    }
}

/// Fill bands on the dark-pixel ratio. The gap between `underfilled_max` and
/// `proper_above` is intentional and falls through to empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillBands {
    pub overfilled_above: f64,
    pub proper_above: f64,
    pub proper_max: f64,
    pub underfilled_above: f64,
    pub underfilled_max: f64,
}

impl Default for FillBands {
    fn default() -> Self {
        Self {
            overfilled_above: 0.47,
            proper_above: 0.42,
            proper_max: 0.47,
            underfilled_above: 0.001,
            underfilled_max: 0.41,
        }
    }
}

/// Exclusive `(low, high)` interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenInterval {
    pub low: f64,
    pub high: f64,
}

impl OpenInterval {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }
}

/// Acceptable shares of red, black and white among classified pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentBands {
    pub red: OpenInterval,
    pub black: OpenInterval,
    pub white: OpenInterval,
}

impl Default for AlignmentBands {
    fn default() -> Self {
        Self {
            red: OpenInterval::new(0.03, 0.85),
            black: OpenInterval::new(0.03, 0.27),
            white: OpenInterval::new(0.017, 0.3),
        }
    }
}

/// Configuration for the inspection engine
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionConfig {
    /// Region layout derived from each frame's dimensions
    pub layout: RoiLayout,
    /// Colour classes per analyser
    pub classes: ClassThresholds,
    pub cap: CapBands,
    pub label: LabelBands,
    pub fill: FillBands,
    pub alignment: AlignmentBands,
    /// Collect the four region statistics on the rayon pool instead of in sequence
    pub parallel_regions: bool,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            layout: RoiLayout::default(),
            classes: ClassThresholds::default(),
            cap: CapBands::default(),
            label: LabelBands::default(),
            fill: FillBands::default(),
            alignment: AlignmentBands::default(),
            parallel_regions: false,
        }
    }
}

impl InspectionConfig {
    pub fn builder() -> InspectionConfigBuilder {
        InspectionConfigBuilder::default()
    }
}

/// Builder for InspectionConfig
#[derive(Default)]
pub struct InspectionConfigBuilder {
    layout: Option<RoiLayout>,
    classes: Option<ClassThresholds>,
    cap: Option<CapBands>,
    label: Option<LabelBands>,
    fill: Option<FillBands>,
    alignment: Option<AlignmentBands>,
    parallel_regions: Option<bool>,
}

impl InspectionConfigBuilder {
    pub fn layout(mut self, layout: RoiLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn classes(mut self, classes: ClassThresholds) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn cap(mut self, cap: CapBands) -> Self {
        self.cap = Some(cap);
        self
    }

    pub fn label(mut self, label: LabelBands) -> Self {
        self.label = Some(label);
        self
    }

    pub fn fill(mut self, fill: FillBands) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn alignment(mut self, alignment: AlignmentBands) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn parallel_regions(mut self, enable: bool) -> Self {
        self.parallel_regions = Some(enable);
        self
    }

    pub fn build(self) -> InspectionConfig {
        let default = InspectionConfig::default();
        InspectionConfig {
            layout: self.layout.unwrap_or(default.layout),
            classes: self.classes.unwrap_or(default.classes),
            cap: self.cap.unwrap_or(default.cap),
            label: self.label.unwrap_or(default.label),
            fill: self.fill.unwrap_or(default.fill),
            alignment: self.alignment.unwrap_or(default.alignment),
            parallel_regions: self.parallel_regions.unwrap_or(default.parallel_regions),
        }
    }
}
