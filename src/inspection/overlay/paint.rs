use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::inspection::common::error::Result;
use crate::inspection::engine::InspectionOutcome;
use crate::inspection::raster::RgbFrame;

/// Outlines every finding's regions on a copy of `frame`.
///
/// The rectangle spans `[x, y]` to `[x + w, y + h]` inclusive and the outline
/// grows inward; pixels past the frame edge are dropped.
pub fn paint_overlay(frame: &RgbFrame, outcome: &InspectionOutcome, outline_width: u32) -> Result<RgbImage> {
    let mut canvas = frame.to_rgb_image()?;

    for (region, color) in outcome.annotations() {
        let outer_width = region.w + 1;
        let outer_height = region.h + 1;

        for inset in 0..outline_width {
            let width = outer_width.saturating_sub(2 * inset);
            let height = outer_height.saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            let rect = Rect::at((region.x + inset) as i32, (region.y + inset) as i32)
                .of_size(width, height);
            draw_hollow_rect_mut(&mut canvas, rect, Rgb(color.rgb()));
        }
    }

    Ok(canvas)
}
