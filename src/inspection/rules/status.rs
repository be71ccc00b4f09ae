use std::fmt;

/// Outline colour used when a status is drawn on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    Green,
    Red,
    Orange,
    Blue,
}

impl DisplayColor {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayColor::Green => "green",
            DisplayColor::Red => "red",
            DisplayColor::Orange => "orange",
            DisplayColor::Blue => "blue",
        }
    }

    /// Named-colour values as image libraries define them (green is half intensity).
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            DisplayColor::Green => [0, 128, 0],
            DisplayColor::Red => [255, 0, 0],
            DisplayColor::Orange => [255, 165, 0],
            DisplayColor::Blue => [0, 0, 255],
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefectStatus {
    pub label: &'static str,
    pub color: DisplayColor,
}

impl DefectStatus {
    pub const fn new(label: &'static str, color: DisplayColor) -> Self {
        Self { label, color }
    }
}

impl fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Defect dimensions in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefectDimension {
    CapPresence,
    LabelCondition,
    FillLevel,
    LabelAlignment,
}

impl DefectDimension {
    pub const ALL: [DefectDimension; 4] = [
        DefectDimension::CapPresence,
        DefectDimension::LabelCondition,
        DefectDimension::FillLevel,
        DefectDimension::LabelAlignment,
    ];
}

impl fmt::Display for DefectDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefectDimension::CapPresence => "cap presence",
            DefectDimension::LabelCondition => "label condition",
            DefectDimension::FillLevel => "fill level",
            DefectDimension::LabelAlignment => "label alignment",
        };
        f.write_str(name)
    }
}
