// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{GridOptions, LogicalRect};

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    format!("gridlines {}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
        }
    }
}

// A demo host surface. The rect is given in fractions of the window so
// panels follow window resizes.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl PanelConfig {
    // Layout rect for a window of the given logical size
    pub fn rect_in(&self, window_width: f64, window_height: f64) -> LogicalRect {
        LogicalRect::new(
            self.x * window_width,
            self.y * window_height,
            self.width * window_width,
            self.height * window_height,
        )
    }
}

pub type GridConfig = GridOptions;
