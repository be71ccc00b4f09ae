//! Pixel colour classification
//!
//! Every predicate here is a strict per-channel comparison against a threshold.
//! The categories overlap: a pixel that is `black` at 50 is also `dark` at 100.
//! Each analyser picks the classes and thresholds it was calibrated with.

use std::fmt;

use crate::inspection::raster::Rgb;

pub const DEFAULT_RED_THRESHOLD: u8 = 100;
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;
pub const DEFAULT_BLACK_THRESHOLD: u8 = 50;
pub const DEFAULT_DARK_THRESHOLD: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelCategory {
    Red,
    White,
    Black,
    Dark,
}

impl fmt::Display for PixelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelCategory::Red => "red",
            PixelCategory::White => "white",
            PixelCategory::Black => "black",
            PixelCategory::Dark => "dark",
        };
        f.write_str(name)
    }
}

/// r > t, g < t, b < t
#[inline]
pub fn is_red(pixel: Rgb, threshold: u8) -> bool {
    let [r, g, b] = pixel;
    r > threshold && g < threshold && b < threshold
}

/// All channels above `threshold`.
#[inline]
pub fn is_white(pixel: Rgb, threshold: u8) -> bool {
    let [r, g, b] = pixel;
    r > threshold && g > threshold && b > threshold
}

/// All channels below `threshold`.
#[inline]
pub fn is_black(pixel: Rgb, threshold: u8) -> bool {
    let [r, g, b] = pixel;
    r < threshold && g < threshold && b < threshold
}

/// Same comparison as [`is_black`], kept separate because fill level and label
/// analysis are calibrated on different thresholds.
#[inline]
pub fn is_dark(pixel: Rgb, threshold: u8) -> bool {
    let [r, g, b] = pixel;
    r < threshold && g < threshold && b < threshold
}

/// A category together with the thresholds it is tested against.
///
/// Red carries two thresholds: the red channel must exceed `red_above` while
/// green and blue stay under `others_below`. The plain `is_red(p, t)` form is
/// `ColorClass::red(t)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Red { red_above: u8, others_below: u8 },
    White { above: u8 },
    Black { below: u8 },
    Dark { below: u8 },
}

impl ColorClass {
    pub const fn red(threshold: u8) -> Self {
        ColorClass::Red {
            red_above: threshold,
            others_below: threshold,
        }
    }

    pub const fn white(threshold: u8) -> Self {
        ColorClass::White { above: threshold }
    }

    pub const fn black(threshold: u8) -> Self {
        ColorClass::Black { below: threshold }
    }

    pub const fn dark(threshold: u8) -> Self {
        ColorClass::Dark { below: threshold }
    }

    pub fn category(&self) -> PixelCategory {
        match self {
            ColorClass::Red { .. } => PixelCategory::Red,
            ColorClass::White { .. } => PixelCategory::White,
            ColorClass::Black { .. } => PixelCategory::Black,
            ColorClass::Dark { .. } => PixelCategory::Dark,
        }
    }

    #[inline]
    pub fn matches(&self, pixel: Rgb) -> bool {
        match *self {
            ColorClass::Red {
                red_above,
                others_below,
            } => {
                let [r, g, b] = pixel;
                r > red_above && g < others_below && b < others_below
            }
            ColorClass::White { above } => is_white(pixel, above),
            ColorClass::Black { below } => is_black(pixel, below),
            ColorClass::Dark { below } => is_dark(pixel, below),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_boundary_is_exclusive() {
        assert!(is_red([101, 99, 99], DEFAULT_RED_THRESHOLD));
        assert!(!is_red([100, 0, 0], DEFAULT_RED_THRESHOLD));
        assert!(!is_red([255, 100, 0], DEFAULT_RED_THRESHOLD));
        assert!(!is_red([255, 0, 100], DEFAULT_RED_THRESHOLD));
    }

    #[test]
    fn test_white_black_dark_defaults() {
        assert!(is_white([201, 201, 201], DEFAULT_WHITE_THRESHOLD));
        assert!(!is_white([200, 255, 255], DEFAULT_WHITE_THRESHOLD));
        assert!(is_black([49, 49, 49], DEFAULT_BLACK_THRESHOLD));
        assert!(!is_black([50, 0, 0], DEFAULT_BLACK_THRESHOLD));
        assert!(is_dark([99, 99, 99], DEFAULT_DARK_THRESHOLD));
        assert!(!is_dark([99, 99, 100], DEFAULT_DARK_THRESHOLD));
    }

    #[test]
    fn test_dark_and_black_overlap() {
        let pixel = [10, 10, 10];
        assert!(is_black(pixel, DEFAULT_BLACK_THRESHOLD));
        assert!(is_dark(pixel, DEFAULT_DARK_THRESHOLD));

        let grey = [70, 70, 70];
        assert!(!is_black(grey, DEFAULT_BLACK_THRESHOLD));
        assert!(is_dark(grey, DEFAULT_DARK_THRESHOLD));
    }

    #[test]
    fn test_split_red_thresholds() {
        let strict = ColorClass::Red {
            red_above: 150,
            others_below: 100,
        };
        assert!(!strict.matches([140, 0, 0]));
        assert!(ColorClass::red(100).matches([140, 0, 0]));
        assert!(strict.matches([151, 99, 99]));
        assert_eq!(strict.category(), PixelCategory::Red);
    }
}
