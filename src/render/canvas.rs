// src/render/canvas.rs
//
// The immediate-mode 2D canvas the engine paints into, and a recording
// implementation that keeps committed strokes as a display list.

use crate::models::{raster_pt, GridLine, LogicalSize, RasterPoint};

const DEFAULT_STROKE_STYLE: &str = "#000000";
const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Subset of a browser-style 2D context that a paint pass needs.
pub trait Canvas2d {
    // backing buffer size in raster pixels; resets contents and state
    fn set_size(&mut self, width: u32, height: u32);
    // visual size in layout pixels
    fn set_display_size(&mut self, size: LogicalSize);
    // visual offset (x, y) in layout pixels relative to the container
    fn set_display_margin(&mut self, x: f64, y: f64);
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke(&mut self);
}

// 2D affine transform in canvas order: x' = a*x + c*y + e, y' = b*x + d*y + f
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, x: f64, y: f64) -> RasterPoint {
        raster_pt(
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// One committed stroke() call
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub line_width: f64,
    pub segments: Vec<GridLine>,
}

#[derive(Debug, Clone)]
pub struct CanvasSurface {
    width: u32,
    height: u32,
    display_size: LogicalSize,
    display_margin: (f64, f64),

    // context state
    transform: Affine,
    stroke_style: String,
    line_width: f64,
    path: Vec<GridLine>,
    current_point: Option<RasterPoint>,

    // bitmap contents
    strokes: Vec<Stroke>,
    resize_count: usize,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasSurface {
    // A fresh canvas, 300x150 like an HTML canvas element
    pub fn new() -> Self {
        Self {
            width: 300,
            height: 150,
            display_size: LogicalSize::new(300.0, 150.0),
            display_margin: (0.0, 0.0),
            transform: Affine::IDENTITY,
            stroke_style: DEFAULT_STROKE_STYLE.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            path: Vec::new(),
            current_point: None,
            strokes: Vec::new(),
            resize_count: 0,
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn display_size(&self) -> LogicalSize {
        self.display_size
    }

    pub fn display_margin(&self) -> (f64, f64) {
        self.display_margin
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    // number of set_size calls so far
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    // layout pixels per raster pixel on each axis
    pub fn display_scale(&self) -> (f64, f64) {
        let sx = if self.width > 0 {
            self.display_size.width / self.width as f64
        } else {
            0.0
        };
        let sy = if self.height > 0 {
            self.display_size.height / self.height as f64
        } else {
            0.0
        };
        (sx, sy)
    }

    fn reset_state(&mut self) {
        self.transform = Affine::IDENTITY;
        self.stroke_style = DEFAULT_STROKE_STYLE.to_string();
        self.line_width = DEFAULT_LINE_WIDTH;
        self.path.clear();
        self.current_point = None;
    }
}

impl Canvas2d for CanvasSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.strokes.clear();
        self.reset_state();
        self.resize_count += 1;
    }

    fn set_display_size(&mut self, size: LogicalSize) {
        self.display_size = size;
    }

    fn set_display_margin(&mut self, x: f64, y: f64) {
        self.display_margin = (x, y);
    }

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transform = Affine { a, b, c, d, e, f };
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let covers_all =
            x <= 0.0 && y <= 0.0 && x + width >= self.width as f64 && y + height >= self.height as f64;
        if covers_all {
            self.strokes.clear();
            return;
        }

        // vector strokes cannot be partially erased; drop segments fully inside
        let inside = |p: &RasterPoint| p.x >= x && p.x <= x + width && p.y >= y && p.y <= y + height;
        for stroke in &mut self.strokes {
            stroke
                .segments
                .retain(|s| !(inside(&s.start) && inside(&s.end)));
        }
        self.strokes.retain(|s| !s.segments.is_empty());
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current_point = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.current_point = Some(self.transform.apply(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.transform.apply(x, y);
        if let Some(start) = self.current_point {
            self.path.push(GridLine::new(start, point));
        }
        self.current_point = Some(point);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = style.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        // like a 2D context, ignore non-positive and non-finite widths
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.strokes.push(Stroke {
            color: self.stroke_style.clone(),
            line_width: self.line_width,
            segments: self.path.clone(),
        });
    }
}
