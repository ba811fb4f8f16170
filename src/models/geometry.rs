// src/models/geometry.rs
// Some types for working with logical and raster geometry

use serde::{Deserialize, Serialize};

// A point on the backing raster surface, in raster pixels.
// Origin is the top-left corner, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RasterPoint {
    pub x: f64,
    pub y: f64,
}

pub fn raster_pt(x: f64, y: f64) -> RasterPoint {
    RasterPoint { x, y }
}

// Width and height of a container in layout pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

// An axis-aligned rectangle in layout pixels, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LogicalRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> LogicalSize {
        LogicalSize::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    // Overlapping area with another rectangle, 0 when disjoint
    pub fn intersection_area(&self, other: &LogicalRect) -> f64 {
        let w = self.max_x().min(other.max_x()) - self.x.max(other.x);
        let h = self.max_y().min(other.max_y()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

// A single straight stroke segment on the raster surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: RasterPoint,
    pub end: RasterPoint,
}

impl GridLine {
    pub fn new(start: RasterPoint, end: RasterPoint) -> Self {
        Self { start, end }
    }

    pub fn horizontal(y: f64, from_x: f64, to_x: f64) -> Self {
        Self::new(raster_pt(from_x, y), raster_pt(to_x, y))
    }

    pub fn vertical(x: f64, from_y: f64, to_y: f64) -> Self {
        Self::new(raster_pt(x, from_y), raster_pt(x, to_y))
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }
}
