// src/render/mod.rs
// The canvas seam between the grid engine and whatever displays it

pub mod canvas;
pub mod canvas_renderer;

pub use canvas::{Affine, Canvas2d, CanvasSurface, Stroke};
pub use canvas_renderer::{draw_canvas, parse_color, CanvasPlacement};
