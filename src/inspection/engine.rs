//! Inspection engine
//!
//! Pure analysis of one in-memory frame: regions, statistics, decisions and the
//! issue report. No decoding, drawing or file access happens here.

use tracing::{debug, info, instrument};

use crate::inspection::common::error::Result;
use crate::inspection::config::InspectionConfig;
use crate::inspection::geometry::{InspectionRegions, Region, RegionKind};
use crate::inspection::raster::Raster;
use crate::inspection::report::IssueReport;
use crate::inspection::rules::{
    AlignmentMetrics, CapMetrics, DefectDimension, DefectStatus, DisplayColor, FillMetrics,
    LabelMetrics, RuleBook,
};
use crate::inspection::statistics::RegionStatistics;

/// Verdict for one defect dimension, with what the overlay needs to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub dimension: DefectDimension,
    pub statistics: RegionStatistics,
    pub status: DefectStatus,
    /// Regions the status is drawn on. Alignment is decided on the whole frame
    /// but drawn on both strips.
    pub regions: Vec<Region>,
}

impl Finding {
    pub fn color(&self) -> DisplayColor {
        self.status.color
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionOutcome {
    pub regions: InspectionRegions,
    /// One finding per dimension, in report order
    pub findings: Vec<Finding>,
    pub report: IssueReport,
}

impl InspectionOutcome {
    pub fn finding(&self, dimension: DefectDimension) -> Option<&Finding> {
        self.findings.iter().find(|f| f.dimension == dimension)
    }

    pub fn status(&self, dimension: DefectDimension) -> Option<DefectStatus> {
        self.finding(dimension).map(|f| f.status)
    }

    /// Every rectangle to outline, with its colour.
    pub fn annotations(&self) -> impl Iterator<Item = (Region, DisplayColor)> + '_ {
        self.findings
            .iter()
            .flat_map(|f| f.regions.iter().map(move |r| (*r, f.color())))
    }
}

struct FrameStatistics {
    cap: RegionStatistics,
    label: RegionStatistics,
    fill: RegionStatistics,
    frame: RegionStatistics,
}

pub struct Inspector {
    config: InspectionConfig,
    rules: RuleBook,
}

impl Inspector {
    pub fn new(config: InspectionConfig) -> Self {
        let rules = RuleBook::from_config(&config);
        Self { config, rules }
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    #[instrument(skip_all, fields(width = raster.width(), height = raster.height()))]
    pub fn inspect<R: Raster + Sync + ?Sized>(&self, raster: &R) -> Result<InspectionOutcome> {
        let regions = {
            let _span = tracing::info_span!("derive_regions").entered();
            self.config.layout.derive(raster.width(), raster.height())?
        };

        let stats = {
            let _span = tracing::info_span!(
                "collect_statistics",
                parallel = self.config.parallel_regions
            )
            .entered();
            if self.config.parallel_regions {
                self.collect_parallel(raster, &regions)?
            } else {
                self.collect_sequential(raster, &regions)?
            }
        };

        let findings = {
            let _span = tracing::info_span!("evaluate_rules").entered();
            self.evaluate(&regions, stats)
        };

        let report = IssueReport::aggregate(findings.iter().map(|f| f.status));
        info!(passed = report.passed(), "Inspection complete: {}", report);

        Ok(InspectionOutcome {
            regions,
            findings,
            report,
        })
    }

    fn collect_sequential<R: Raster + ?Sized>(
        &self,
        raster: &R,
        regions: &InspectionRegions,
    ) -> Result<FrameStatistics> {
        let classes = &self.config.classes;
        Ok(FrameStatistics {
            cap: RegionStatistics::collect(raster, RegionKind::Cap, regions.cap, &[classes.cap_red])?,
            label: RegionStatistics::collect(
                raster,
                RegionKind::Label,
                regions.label,
                &[classes.label_red, classes.label_white, classes.label_black],
            )?,
            fill: RegionStatistics::collect(
                raster,
                RegionKind::Fill,
                regions.fill,
                &[classes.fill_dark],
            )?,
            frame: RegionStatistics::collect(
                raster,
                RegionKind::Frame,
                Region::full(raster.width(), raster.height()),
                &[
                    classes.alignment_red,
                    classes.alignment_black,
                    classes.alignment_white,
                ],
            )?,
        })
    }

    /// Fan out the four statistics onto the rayon pool and wait for all of them.
    fn collect_parallel<R: Raster + Sync + ?Sized>(
        &self,
        raster: &R,
        regions: &InspectionRegions,
    ) -> Result<FrameStatistics> {
        let classes = &self.config.classes;
        let frame_region = Region::full(raster.width(), raster.height());

        let ((cap, label), (fill, frame)) = rayon::join(
            || {
                rayon::join(
                    || {
                        RegionStatistics::collect(
                            raster,
                            RegionKind::Cap,
                            regions.cap,
                            &[classes.cap_red],
                        )
                    },
                    || {
                        RegionStatistics::collect(
                            raster,
                            RegionKind::Label,
                            regions.label,
                            &[classes.label_red, classes.label_white, classes.label_black],
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        RegionStatistics::collect(
                            raster,
                            RegionKind::Fill,
                            regions.fill,
                            &[classes.fill_dark],
                        )
                    },
                    || {
                        RegionStatistics::collect_parallel(
                            raster,
                            RegionKind::Frame,
                            frame_region,
                            &[
                                classes.alignment_red,
                                classes.alignment_black,
                                classes.alignment_white,
                            ],
                        )
                    },
                )
            },
        );

        Ok(FrameStatistics {
            cap: cap?,
            label: label?,
            fill: fill?,
            frame: frame?,
        })
    }

    fn evaluate(&self, regions: &InspectionRegions, stats: FrameStatistics) -> Vec<Finding> {
        let cap = CapMetrics::from_statistics(&stats.cap);
        let label = LabelMetrics::from_statistics(&stats.label);
        let fill = FillMetrics::from_statistics(&stats.fill);
        let alignment = AlignmentMetrics::from_statistics(&stats.frame);

        debug!(red_pixels = cap.red_pixels, "Cap metrics");
        debug!(
            red = label.red_ratio,
            white = label.white_ratio,
            black = label.black_ratio,
            "Label metrics"
        );
        debug!(fill_ratio = fill.fill_ratio, "Fill metrics");
        debug!(
            classified = alignment.classified,
            red = alignment.red_share,
            black = alignment.black_share,
            white = alignment.white_share,
            "Alignment metrics"
        );

        vec![
            Finding {
                dimension: DefectDimension::CapPresence,
                status: self.rules.cap.evaluate(&cap),
                statistics: stats.cap,
                regions: vec![regions.cap],
            },
            Finding {
                dimension: DefectDimension::LabelCondition,
                status: self.rules.label.evaluate(&label),
                statistics: stats.label,
                regions: vec![regions.label],
            },
            Finding {
                dimension: DefectDimension::FillLevel,
                status: self.rules.fill.evaluate(&fill),
                statistics: stats.fill,
                regions: vec![regions.fill],
            },
            Finding {
                dimension: DefectDimension::LabelAlignment,
                status: self.rules.alignment.evaluate(&alignment),
                statistics: stats.frame,
                regions: regions.alignment.to_vec(),
            },
        ]
    }
}
