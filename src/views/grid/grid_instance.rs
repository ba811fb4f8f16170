// src/views/grid/grid_instance.rs
//
// The GridInstance binds one resolved GridSpec to one host element and
// decides when a paint pass runs.
//
// Pending: the element had no area at construction. No canvas exists and
// a one-shot visibility watch is armed.
// Active: the canvas is attached, a resize listener is registered and
// every resize or column change repaints. Active is terminal.

use log::{debug, info};
use std::fmt;

use crate::{
    draw::{paint_frame, GridFrame, ScaleLayout},
    models::{GridOptions, GridSpec},
    services::{Document, ElementId, HostEvents, Position, VISIBILITY_THRESHOLD},
    views::grid::GridError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Pending,
    Active,
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridState::Pending => f.write_str("pending"),
            GridState::Active => f.write_str("active"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridInstance {
    id: InstanceId,
    element: ElementId,
    spec: GridSpec,
    state: GridState,

    // result of the last pass that actually painted
    layout: Option<ScaleLayout>,
    paint_count: usize,
}

impl GridInstance {
    pub fn new(
        id: InstanceId,
        document: &mut Document,
        element: ElementId,
        options: &GridOptions,
        events: &mut HostEvents<InstanceId>,
    ) -> Result<Self, GridError> {
        let host = document
            .element(element)
            .ok_or(GridError::UnknownElement(element))?;
        let spec = GridSpec::resolve(options, host);
        let has_area = host.offset_size().has_area();

        info!(
            "{}: {} grid with {} columns on {:?}",
            id, spec.variant, spec.columns, element
        );

        let mut instance = Self {
            id,
            element,
            spec,
            state: GridState::Pending,
            layout: None,
            paint_count: 0,
        };

        if has_area {
            instance.initialize(document, events);
        } else {
            debug!("{}: element has no area, waiting for visibility", id);
            events.visibility.observe(id, element, VISIBILITY_THRESHOLD);
        }
        Ok(instance)
    }

    /************************** Lifecycle *************************************/

    /// Pending -> Active. Attaches the canvas, subscribes to viewport
    /// resizes and runs the first paint pass. Returns false if the
    /// instance was already active.
    pub fn initialize(&mut self, document: &mut Document, events: &mut HostEvents<InstanceId>) -> bool {
        if self.state == GridState::Active {
            return false;
        }
        self.state = GridState::Active;
        events.visibility.unobserve(self.id);

        if let Some(host) = document.element_mut(self.element) {
            // the canvas is positioned against its container
            if host.position == Position::Static {
                host.position = Position::Relative;
            }
            host.attach_canvas();
        }
        events.resize.subscribe(self.id);
        info!("{}: active", self.id);

        self.scale(document);
        true
    }

    /// Updates the column count. A pending instance keeps the value until
    /// it activates. Returns whether a paint pass ran.
    pub fn set_column_count(&mut self, document: &mut Document, columns: u32) -> Result<bool, GridError> {
        if columns < 1 {
            return Err(GridError::InvalidColumnCount(columns));
        }
        self.spec.columns = columns;
        match self.state {
            GridState::Active => Ok(self.scale(document)),
            GridState::Pending => {
                debug!("{}: columns set to {} while pending", self.id, columns);
                Ok(false)
            }
        }
    }

    pub fn on_resize(&mut self, document: &mut Document) -> bool {
        match self.state {
            GridState::Active => self.scale(document),
            GridState::Pending => false,
        }
    }

    /************************** Paint pass ************************************/

    // Skipped entirely (canvas and layout untouched) when the document has
    // no viewport or the element has no area.
    fn scale(&mut self, document: &mut Document) -> bool {
        let Some(viewport) = document.viewport().copied() else {
            debug!("{}: no viewport, skipping paint", self.id);
            return false;
        };
        let Some(host) = document.element_mut(self.element) else {
            return false;
        };

        let Some(frame) = GridFrame::plan(&self.spec, host.offset_size(), viewport.device_pixel_ratio) else {
            debug!("{}: element has no area, keeping previous canvas", self.id);
            return false;
        };

        paint_frame(host.attach_canvas(), &self.spec, &frame);
        debug!(
            "{}: painted {} lines on {}x{} raster",
            self.id,
            frame.lines.len(),
            frame.layout.pixel_size().0,
            frame.layout.pixel_size().1
        );
        self.layout = Some(frame.layout);
        self.paint_count += 1;
        true
    }

    /************************** Accessors *************************************/

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GridState::Active
    }

    pub fn layout(&self) -> Option<&ScaleLayout> {
        self.layout.as_ref()
    }

    pub fn paint_count(&self) -> usize {
        self.paint_count
    }
}
