use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use image::RgbImage;

use crate::inspection::common::error::{InspectionError, Result};
use crate::inspection::config::{CapBands, FillBands, InspectionConfig};
use crate::inspection::engine::Inspector;
use crate::inspection::geometry::Region;
use crate::inspection::overlay::{OverlayCompression, OverlayConfig, OverlayWriter, paint_overlay};
use crate::inspection::pipeline::InspectionPipeline;
use crate::inspection::raster::{FrameReader, Rgb, RgbFrame};
use crate::inspection::report::NO_ISSUE;
use crate::inspection::rules::{
    CAP_MISSING, CAP_PRESENT, DefectDimension, DisplayColor, EMPTY, LABEL_MISSING, LABEL_OK,
    MISALIGNED, OVERFILLED, PROPERLY_ALIGNED, PROPERLY_FILLED,
};
use crate::inspection::classify::PixelCategory;

const GREY: Rgb = [128, 128, 128];
const RED: Rgb = [200, 0, 0];
const BLUE: Rgb = [0, 0, 200];
const BLACK: Rgb = [0, 0, 0];
const WHITE: Rgb = [255, 255, 255];
const LIQUID: Rgb = [60, 60, 60];

/// 300x240 bottle: red cap, blue label with red/black/white print bands and
/// `dark_pixels` of liquid filled row by row from the top of the fill region.
fn synthetic_bottle(dark_pixels: u32) -> RgbFrame {
    let mut frame = RgbFrame::filled(300, 240, GREY);
    frame.fill_region(&Region::new(120, 8, 60, 35), RED);
    frame.fill_region(&Region::new(98, 120, 105, 120), BLUE);
    frame.fill_region(&Region::new(98, 200, 105, 10), RED);
    frame.fill_region(&Region::new(98, 215, 105, 10), BLACK);
    frame.fill_region(&Region::new(98, 230, 105, 5), WHITE);
    for i in 0..dark_pixels {
        frame.set_pixel(125 + i % 50, 80 + i / 50, LIQUID);
    }
    frame
}

struct MockReader {
    should_fail: bool,
    frame: RgbFrame,
}

impl FrameReader for MockReader {
    fn read_frame(&self, _data: &[u8]) -> Result<RgbFrame> {
        if self.should_fail {
            return Err(InspectionError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.frame.clone())
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<RgbImage>>>,
}

impl OverlayWriter for MockWriter {
    fn write_overlay(&self, image: &RgbImage, _output: &mut dyn Write, _config: &OverlayConfig) -> Result<()> {
        if self.should_fail {
            return Err(InspectionError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn mock_pipeline(
    frame: RgbFrame,
    reader_fails: bool,
    writer_fails: bool,
) -> (InspectionPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<RgbImage>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let pipeline = InspectionPipeline::with_custom(
        MockReader { should_fail: reader_fails, frame },
        MockWriter { should_fail: writer_fails, written: written.clone() },
        InspectionConfig::default(),
    );
    (pipeline, written)
}

#[test]
fn test_config_builder() {
    let config = InspectionConfig::builder()
        .cap(CapBands { min_red_pixels: 1000 })
        .parallel_regions(true)
        .build();

    assert_eq!(config.cap.min_red_pixels, 1000);
    assert!(config.parallel_regions);
    assert_eq!(config.fill, FillBands::default());
}

#[test]
fn test_clean_bottle_reports_no_issue() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(1620), false, false);
    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();

    assert_eq!(outcome.status(DefectDimension::CapPresence).unwrap().label, CAP_PRESENT);
    assert_eq!(outcome.status(DefectDimension::LabelCondition).unwrap().label, LABEL_OK);
    assert_eq!(outcome.status(DefectDimension::FillLevel).unwrap().label, PROPERLY_FILLED);
    assert_eq!(
        outcome.status(DefectDimension::LabelAlignment).unwrap().label,
        PROPERLY_ALIGNED
    );
    assert_eq!(outcome.report.issues(), [NO_ISSUE]);
    assert!(outcome.report.passed());
}

#[test]
fn test_overfilled_bottle() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(1800), false, false);
    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();

    assert_eq!(outcome.report.issues(), [OVERFILLED]);
}

#[test]
fn test_finding_statistics() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(1620), false, false);
    let outcome = pipeline.inspect(&synthetic_bottle(1620)).unwrap();

    let cap = outcome.finding(DefectDimension::CapPresence).unwrap();
    assert_eq!(cap.statistics.count(PixelCategory::Red), 2100);

    let fill = outcome.finding(DefectDimension::FillLevel).unwrap();
    assert_eq!(fill.statistics.count(PixelCategory::Dark), 1620);
    assert!((fill.statistics.ratio(PixelCategory::Dark) - 0.45).abs() < 1e-12);

    let alignment = outcome.finding(DefectDimension::LabelAlignment).unwrap();
    assert_eq!(alignment.statistics.count(PixelCategory::Red), 3150);
    assert_eq!(alignment.statistics.count(PixelCategory::Black), 1050);
    assert_eq!(alignment.statistics.count(PixelCategory::White), 525);
}

#[test]
fn test_decoded_image_inspects_like_frame() {
    let frame = synthetic_bottle(1800);
    let image = frame.to_rgb_image().unwrap();
    let inspector = Inspector::new(InspectionConfig::default());

    let from_image = inspector.inspect(&image).unwrap();
    assert_eq!(from_image, inspector.inspect(&frame).unwrap());
    assert_eq!(from_image.report.issues(), [OVERFILLED]);
}

#[test]
fn test_findings_follow_report_order() {
    let (pipeline, _) = mock_pipeline(RgbFrame::filled(300, 240, GREY), false, false);
    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();

    let dimensions: Vec<_> = outcome.findings.iter().map(|f| f.dimension).collect();
    assert_eq!(dimensions, DefectDimension::ALL);
}

#[test]
fn test_grey_frame_flags_everything() {
    let (pipeline, _) = mock_pipeline(RgbFrame::filled(300, 240, GREY), false, false);
    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();

    assert_eq!(
        outcome.report.issues(),
        [CAP_MISSING, LABEL_MISSING, EMPTY, MISALIGNED]
    );
    assert_eq!(outcome.report.to_string(), "Cap Missing | Label Missing | Empty | Misaligned");
}

#[test]
fn test_parallel_regions_match_sequential() {
    let frame = synthetic_bottle(1000);
    let sequential = InspectionPipeline::new(InspectionConfig::default());
    let parallel = InspectionPipeline::new(
        InspectionConfig::builder().parallel_regions(true).build(),
    );

    assert_eq!(
        sequential.inspect(&frame).unwrap(),
        parallel.inspect(&frame).unwrap()
    );
}

#[test]
fn test_alignment_status_drawn_on_both_strips() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(1620), false, false);
    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();

    let annotations: Vec<_> = outcome.annotations().collect();
    assert_eq!(annotations.len(), 5);
    assert_eq!(annotations[3], (Region::new(103, 230, 110, 10), DisplayColor::Green));
    assert_eq!(annotations[4], (Region::new(103, 148, 110, 10), DisplayColor::Green));
}

#[test]
fn test_overlay_outlines_regions() {
    let frame = synthetic_bottle(1620);
    let (pipeline, _) = mock_pipeline(frame.clone(), false, false);
    let outcome = pipeline.inspect(&frame).unwrap();

    let canvas = paint_overlay(&frame, &outcome, 3).unwrap();

    // cap region 60x35 at (120, 8), outline covers both inclusive edges
    assert_eq!(canvas.get_pixel(120, 8).0, DisplayColor::Green.rgb());
    assert_eq!(canvas.get_pixel(180, 20).0, DisplayColor::Green.rgb());
    assert_eq!(canvas.get_pixel(122, 20).0, DisplayColor::Green.rgb());
    assert_eq!(canvas.get_pixel(123, 20).0, RED);
    // outside every region
    assert_eq!(canvas.get_pixel(5, 5).0, GREY);
}

#[test]
fn test_overlay_written_through_writer() {
    let (pipeline, written) = mock_pipeline(synthetic_bottle(1620), false, false);
    let pipeline = pipeline.with_overlay_config(OverlayConfig {
        compression: OverlayCompression::None,
        outline_width: 1,
    });

    let mut output = Cursor::new(Vec::new());
    let outcome = pipeline
        .inspect_bytes_with_overlay(b"fake frame", &mut output)
        .unwrap();

    assert!(outcome.report.passed());
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].dimensions(), (300, 240));
    assert_eq!(pipeline.overlay_config().outline_width, 1);
}

#[test]
fn test_reader_failure() {
    let (pipeline, written) = mock_pipeline(synthetic_bottle(0), true, false);
    let mut output = Cursor::new(Vec::new());
    let result = pipeline.inspect_bytes_with_overlay(b"fake frame", &mut output);

    assert!(matches!(result.unwrap_err(), InspectionError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(0), false, true);
    let mut output = Cursor::new(Vec::new());
    let result = pipeline.inspect_bytes_with_overlay(b"fake frame", &mut output);

    assert!(matches!(result.unwrap_err(), InspectionError::EncodeError(_)));
}

#[test]
fn test_empty_frame_rejected() {
    let (pipeline, _) = mock_pipeline(synthetic_bottle(0), false, false);
    let empty = RgbFrame::new(0, 0, Vec::new()).unwrap();

    assert!(matches!(
        pipeline.inspect(&empty).unwrap_err(),
        InspectionError::InvalidDimensions(0, 0)
    ));
}

#[test]
fn test_small_frame_geometry_error() {
    let (pipeline, _) = mock_pipeline(RgbFrame::filled(300, 20, GREY), false, false);

    assert!(matches!(
        pipeline.inspect_bytes(b"fake frame").unwrap_err(),
        InspectionError::Geometry { .. }
    ));
}

#[test]
fn test_set_config_rebuilds_rules() {
    let (mut pipeline, _) = mock_pipeline(synthetic_bottle(1620), false, false);
    pipeline.set_config(
        InspectionConfig::builder()
            .cap(CapBands { min_red_pixels: 5000 })
            .build(),
    );

    let outcome = pipeline.inspect_bytes(b"fake frame").unwrap();
    assert_eq!(pipeline.config().cap.min_red_pixels, 5000);
    assert_eq!(outcome.report.issues(), [CAP_MISSING]);
}
