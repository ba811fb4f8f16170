// src/services/document.rs
//
// The host side of the grid: a flat list of container elements with
// layout rects, `data-grid*` attributes and a computed position, plus
// the viewport they are laid out in. Each element can carry one attached
// raster canvas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AttributeSource, LogicalRect, LogicalSize};
use crate::render::CanvasSurface;
use crate::services::selector::{SelectorError, SelectorList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    pub tag: String,
    pub dom_id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub rect: LogicalRect,
    pub hidden: bool,
    pub position: Position,
    canvas: Option<CanvasSurface>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            id: ElementId(usize::MAX),
            tag: tag.to_string(),
            dom_id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            rect: LogicalRect::default(),
            hidden: false,
            position: Position::Static,
            canvas: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.dom_id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_rect(mut self, rect: LogicalRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.id
    }

    // offsetWidth/offsetHeight: hidden elements report zero
    pub fn offset_size(&self) -> LogicalSize {
        if self.hidden {
            LogicalSize::default()
        } else {
            LogicalSize::new(self.rect.width.max(0.0), self.rect.height.max(0.0))
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    // Appends a raster canvas child, or returns the one already attached
    pub fn attach_canvas(&mut self) -> &mut CanvasSurface {
        self.canvas.get_or_insert_with(CanvasSurface::new)
    }

    pub fn canvas(&self) -> Option<&CanvasSurface> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut CanvasSurface> {
        self.canvas.as_mut()
    }
}

impl AttributeSource for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    // None when the host cannot report one
    pub device_pixel_ratio: Option<f64>,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: Option<f64>) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn rect(&self) -> LogicalRect {
        LogicalRect::new(0.0, 0.0, self.width, self.height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    // None for headless hosts without a window
    viewport: Option<Viewport>,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            elements: Vec::new(),
            viewport: Some(viewport),
        }
    }

    pub fn headless() -> Self {
        Self::default()
    }

    pub fn append(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.id = id;
        self.elements.push(element);
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>, SelectorError> {
        Ok(SelectorList::parse(selector)?.query_all(self))
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        if let Some(viewport) = &mut self.viewport {
            viewport.width = width;
            viewport.height = height;
        }
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: Option<f64>) {
        if let Some(viewport) = &mut self.viewport {
            viewport.device_pixel_ratio = ratio;
        }
    }

    pub fn device_pixel_ratio(&self) -> Option<f64> {
        self.viewport.and_then(|v| v.device_pixel_ratio)
    }

    // Share of the element's area inside the viewport, 0.0..=1.0
    pub fn visible_ratio(&self, id: ElementId) -> f64 {
        let (Some(element), Some(viewport)) = (self.element(id), self.viewport) else {
            return 0.0;
        };
        if element.hidden || element.rect.area() <= 0.0 {
            return 0.0;
        }
        element.rect.intersection_area(&viewport.rect()) / element.rect.area()
    }
}
