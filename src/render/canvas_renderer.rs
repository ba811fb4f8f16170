// src/render/canvas_renderer.rs
// Replays a recorded CanvasSurface onto a nannou Draw, placed over the
// container it belongs to.

use log::debug;
use nannou::prelude::*;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::{LogicalRect, RasterPoint};
use crate::render::CanvasSurface;

// Where a canvas sits in window space
#[derive(Debug, Clone, Copy)]
pub struct CanvasPlacement {
    // top-left of the canvas in layout pixels (container origin + margin)
    pub origin_x: f64,
    pub origin_y: f64,
    // layout pixels per raster pixel
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CanvasPlacement {
    pub fn new(canvas: &CanvasSurface, container: &LogicalRect) -> Self {
        let (margin_x, margin_y) = canvas.display_margin();
        let (scale_x, scale_y) = canvas.display_scale();
        Self {
            origin_x: container.x + margin_x,
            origin_y: container.y + margin_y,
            scale_x,
            scale_y,
        }
    }

    // Raster pixel -> nannou point (centered origin, y up)
    pub fn to_window(&self, point: RasterPoint, window: &Rect) -> Point2 {
        let x = self.origin_x + point.x * self.scale_x;
        let y = self.origin_y + point.y * self.scale_y;
        pt2(window.left() + x as f32, window.top() - y as f32)
    }
}

pub fn draw_canvas(draw: &Draw, canvas: &CanvasSurface, container: &LogicalRect, window: &Rect) {
    let placement = CanvasPlacement::new(canvas, container);

    for stroke in canvas.strokes() {
        let color = parse_color(&stroke.color).unwrap_or_else(|| {
            debug!("Unsupported stroke color {:?}, using black", stroke.color);
            rgba(0.0, 0.0, 0.0, 1.0)
        });
        let weight = (stroke.line_width * placement.scale_x) as f32;

        for segment in &stroke.segments {
            draw.line()
                .start(placement.to_window(segment.start, window))
                .end(placement.to_window(segment.end, window))
                .stroke_weight(weight)
                .color(color);
        }
    }
}

/************************** Colors *****************************************/

fn functional_color_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^rgba?\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*(?:,\s*([\d.]+)\s*)?\)$",
        )
        .ok()
    })
    .as_ref()
}

// CSS-ish color strings: #rgb, #rrggbb, #rrggbbaa, rgb(), rgba() and a
// handful of names
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(caps) = functional_color_regex().and_then(|re| re.captures(&value)) {
        let channel = |i: usize| -> Option<f32> { Some(caps[i].parse::<f32>().ok()? / 255.0) };
        let alpha = match caps.get(4) {
            Some(a) => a.as_str().parse::<f32>().ok()?,
            None => 1.0,
        };
        return Some(rgba(channel(1)?, channel(2)?, channel(3)?, alpha.clamp(0.0, 1.0)));
    }

    let named = match value.as_str() {
        "black" => (0.0, 0.0, 0.0),
        "white" => (1.0, 1.0, 1.0),
        "red" => (1.0, 0.0, 0.0),
        "green" => (0.0, 128.0 / 255.0, 0.0),
        "blue" => (0.0, 0.0, 1.0),
        "gray" | "grey" => (128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0),
        "transparent" => return Some(rgba(0.0, 0.0, 0.0, 0.0)),
        _ => return None,
    };
    Some(rgba(named.0, named.1, named.2, 1.0))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let to_unit = |v: u8| v as f32 / 255.0;

    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 | 4 => {
            let mut channels = [255u8; 4];
            for (i, channel) in channels.iter_mut().enumerate().take(hex.len()) {
                *channel = digit(i)? * 17;
            }
            Some(rgba(
                to_unit(channels[0]),
                to_unit(channels[1]),
                to_unit(channels[2]),
                to_unit(channels[3]),
            ))
        }
        6 | 8 => {
            let alpha = if hex.len() == 8 { pair(6)? } else { 255 };
            Some(rgba(
                to_unit(pair(0)?),
                to_unit(pair(2)?),
                to_unit(pair(4)?),
                to_unit(alpha),
            ))
        }
        _ => None,
    }
}
