// src/draw/mod.rs
// The geometry/draw engine: computes raster dimensions and grid lines
// for one paint pass, then replays them onto a 2D canvas.

pub mod grid_draw;
pub mod scale;

pub use grid_draw::{column_positions, grid_lines, ColumnPositions};
pub use scale::ScaleLayout;

use crate::models::{GridLine, GridSpec, LogicalSize};
use crate::render::Canvas2d;

// Everything one paint pass produces, before touching a canvas
#[derive(Debug, Clone, PartialEq)]
pub struct GridFrame {
    pub layout: ScaleLayout,
    pub lines: Vec<GridLine>,
}

impl GridFrame {
    /// Pure planning step. `None` means the container has no area and
    /// the pass must be skipped entirely.
    pub fn plan(
        spec: &GridSpec,
        container: LogicalSize,
        device_pixel_ratio: Option<f64>,
    ) -> Option<Self> {
        let layout = ScaleLayout::compute(spec, container, device_pixel_ratio)?;
        let lines = grid_lines(spec.variant, spec.columns, &layout);
        Some(Self { layout, lines })
    }
}

// Resizes and repositions the canvas, clears it, and strokes all lines
// in a single stroke call.
pub fn paint_frame<C: Canvas2d + ?Sized>(canvas: &mut C, spec: &GridSpec, frame: &GridFrame) {
    let layout = &frame.layout;

    let (width, height) = layout.pixel_size();
    canvas.set_size(width, height);

    let (offset_x, offset_y) = layout.display_offset();
    canvas.set_display_margin(offset_x, offset_y);
    canvas.set_display_size(layout.display_size());

    canvas.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    canvas.clear_rect(0.0, 0.0, width as f64, height as f64);

    canvas.begin_path();
    for line in &frame.lines {
        canvas.move_to(line.start.x, line.start.y);
        canvas.line_to(line.end.x, line.end.y);
    }

    canvas.set_stroke_style(&spec.color);
    canvas.set_line_width(layout.line_width);
    canvas.stroke();
}
