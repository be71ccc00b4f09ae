//! Per-region pixel statistics
//!
//! One pass over the packed rows of a region counts every requested colour
//! class at once. Ratios are taken against the region area, shares against
//! the number of pixels that matched any class.

use rayon::prelude::*;

use crate::inspection::classify::{ColorClass, PixelCategory};
use crate::inspection::common::error::Result;
use crate::inspection::geometry::{Region, RegionKind};
use crate::inspection::raster::{CHANNELS, Raster};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryCount {
    pub class: ColorClass,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStatistics {
    region: Region,
    counts: Vec<CategoryCount>,
}

impl RegionStatistics {
    /// Counts `classes` over `region`. The region is validated against the
    /// raster first, so ratios never divide by zero.
    pub fn collect<R: Raster + ?Sized>(
        raster: &R,
        kind: RegionKind,
        region: Region,
        classes: &[ColorClass],
    ) -> Result<Self> {
        region.validate(kind, raster.width(), raster.height())?;

        let mut totals = vec![0u64; classes.len()];
        for y in region.y..region.bottom() {
            count_row(raster, &region, y, classes, &mut totals);
        }

        Ok(Self::from_totals(region, classes, totals))
    }

    /// Same as [`collect`](Self::collect), with rows split across the rayon pool.
    pub fn collect_parallel<R: Raster + Sync + ?Sized>(
        raster: &R,
        kind: RegionKind,
        region: Region,
        classes: &[ColorClass],
    ) -> Result<Self> {
        region.validate(kind, raster.width(), raster.height())?;

        let totals = (region.y..region.bottom())
            .into_par_iter()
            .fold(
                || vec![0u64; classes.len()],
                |mut totals, y| {
                    count_row(raster, &region, y, classes, &mut totals);
                    totals
                },
            )
            .reduce(
                || vec![0u64; classes.len()],
                |mut left, right| {
                    left.iter_mut().zip(right).for_each(|(l, r)| *l += r);
                    left
                },
            );

        Ok(Self::from_totals(region, classes, totals))
    }

    fn from_totals(region: Region, classes: &[ColorClass], totals: Vec<u64>) -> Self {
        let counts = classes
            .iter()
            .zip(totals)
            .map(|(&class, count)| CategoryCount { class, count })
            .collect();
        Self { region, counts }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn area(&self) -> u64 {
        self.region.area()
    }

    pub fn counts(&self) -> &[CategoryCount] {
        &self.counts
    }

    /// Pixels matching `category`, or 0 when it was not requested.
    pub fn count(&self, category: PixelCategory) -> u64 {
        self.counts
            .iter()
            .find(|c| c.class.category() == category)
            .map_or(0, |c| c.count)
    }

    /// count / area, in [0, 1].
    pub fn ratio(&self, category: PixelCategory) -> f64 {
        self.count(category) as f64 / self.area() as f64
    }

    /// Sum of all class counts. Pixels matching several classes count once per class.
    pub fn classified_total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// count / classified_total, or 0 when nothing was classified.
    pub fn share(&self, category: PixelCategory) -> f64 {
        let total = self.classified_total();
        if total == 0 {
            return 0.0;
        }
        self.count(category) as f64 / total as f64
    }
}

#[inline]
fn count_row<R: Raster + ?Sized>(
    raster: &R,
    region: &Region,
    y: u32,
    classes: &[ColorClass],
    totals: &mut [u64],
) {
    let start = region.x as usize * CHANNELS;
    let end = region.right() as usize * CHANNELS;
    let row = &raster.row(y)[start..end];

    for pixel in row.chunks_exact(CHANNELS) {
        let rgb = [pixel[0], pixel[1], pixel[2]];
        for (total, class) in totals.iter_mut().zip(classes) {
            *total += class.matches(rgb) as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::common::error::InspectionError;
    use crate::inspection::raster::RgbFrame;

    fn half_red_frame() -> RgbFrame {
        let mut frame = RgbFrame::filled(20, 10, [128, 128, 128]);
        frame.fill_region(&Region::new(0, 0, 10, 10), [200, 0, 0]);
        frame
    }

    #[test]
    fn test_counts_and_ratios() {
        let frame = half_red_frame();
        let classes = [ColorClass::red(100), ColorClass::dark(100)];
        let stats =
            RegionStatistics::collect(&frame, RegionKind::Frame, Region::full(20, 10), &classes)
                .unwrap();

        assert_eq!(stats.region(), Region::full(20, 10));
        assert_eq!(stats.area(), 200);
        assert_eq!(stats.count(PixelCategory::Red), 100);
        assert_eq!(stats.count(PixelCategory::Dark), 0);
        assert_eq!(stats.count(PixelCategory::White), 0);
        assert!((stats.ratio(PixelCategory::Red) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sub_region_only_counts_inside() {
        let frame = half_red_frame();
        let classes = [ColorClass::red(100)];
        let stats =
            RegionStatistics::collect(&frame, RegionKind::Cap, Region::new(5, 2, 10, 4), &classes)
                .unwrap();

        assert_eq!(stats.count(PixelCategory::Red), 20);
        assert_eq!(stats.area(), 40);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let frame = half_red_frame();
        let classes = [
            ColorClass::red(100),
            ColorClass::white(200),
            ColorClass::black(50),
        ];
        let region = Region::new(3, 1, 15, 8);
        let sequential =
            RegionStatistics::collect(&frame, RegionKind::Label, region, &classes).unwrap();
        let parallel =
            RegionStatistics::collect_parallel(&frame, RegionKind::Label, region, &classes)
                .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_share_without_matches_is_zero() {
        let frame = RgbFrame::filled(4, 4, [128, 128, 128]);
        let classes = [ColorClass::black(50)];
        let stats =
            RegionStatistics::collect(&frame, RegionKind::Frame, Region::full(4, 4), &classes)
                .unwrap();

        assert_eq!(stats.classified_total(), 0);
        assert_eq!(stats.share(PixelCategory::Black), 0.0);
    }

    #[test]
    fn test_rejects_region_outside_raster() {
        let frame = RgbFrame::filled(4, 4, [0, 0, 0]);
        let result = RegionStatistics::collect(
            &frame,
            RegionKind::Fill,
            Region::new(2, 2, 4, 4),
            &[ColorClass::dark(100)],
        );
        assert!(matches!(result, Err(InspectionError::OutOfBounds { .. })));
    }
}
