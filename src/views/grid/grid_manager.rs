// src/views/grid/grid_manager.rs
//
// The GridManager owns every GridInstance and the host event registrations
// they are armed on. It is the public entry point: init_grid registers
// instances, set_columns updates them all, get_grid looks one up by its
// host element. Host events are fed in through handle_resize and
// handle_visibility.

use log::{info, warn};
use std::collections::HashSet;

use crate::{
    models::{GridOptions, Target},
    services::{Document, ElementId, HostEvents},
    views::grid::{GridError, GridInstance, InstanceId},
};

#[derive(Debug, Default)]
pub struct GridManager {
    grids: Vec<GridInstance>,
    next_id: usize,
    events: HostEvents<InstanceId>,
}

impl GridManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one instance per element matched by `options.targets`.
    /// Targets are validated before anything is registered, so an error
    /// leaves the manager unchanged.
    pub fn init_grid(
        &mut self,
        document: &mut Document,
        options: &GridOptions,
    ) -> Result<Vec<InstanceId>, GridError> {
        let elements = resolve_targets(document, &options.targets)?;
        if elements.is_empty() {
            warn!("Grid target {:?} matched no elements", options.targets);
        }

        let mut created = Vec::with_capacity(elements.len());
        for element in elements {
            let id = InstanceId(self.next_id);
            let instance = GridInstance::new(id, document, element, options, &mut self.events)?;
            self.next_id += 1;
            self.grids.push(instance);
            created.push(id);
        }
        info!("Registered {} grid(s), {} total", created.len(), self.grids.len());
        Ok(created)
    }

    /// Applies a column count to every instance. Each instance is updated
    /// independently; returns how many repainted.
    pub fn set_columns(&mut self, document: &mut Document, columns: u32) -> Result<usize, GridError> {
        if columns < 1 {
            return Err(GridError::InvalidColumnCount(columns));
        }
        let mut painted = 0;
        for grid in &mut self.grids {
            if grid.set_column_count(document, columns)? {
                painted += 1;
            }
        }
        Ok(painted)
    }

    // Like set_columns, restricted to instances whose element matches
    pub fn set_columns_for(
        &mut self,
        document: &mut Document,
        selector: &str,
        columns: u32,
    ) -> Result<usize, GridError> {
        if columns < 1 {
            return Err(GridError::InvalidColumnCount(columns));
        }
        let matched: HashSet<ElementId> = document
            .query_selector_all(selector)
            .map_err(|e| GridError::from_selector(selector, e))?
            .into_iter()
            .collect();

        let mut painted = 0;
        for grid in self.grids.iter_mut().filter(|g| matched.contains(&g.element())) {
            if grid.set_column_count(document, columns)? {
                painted += 1;
            }
        }
        Ok(painted)
    }

    // First instance registered on `element`
    pub fn get_grid(&self, element: ElementId) -> Option<&GridInstance> {
        self.grids.iter().find(|g| g.element() == element)
    }

    pub fn get_grid_mut(&mut self, element: ElementId) -> Option<&mut GridInstance> {
        self.grids.iter_mut().find(|g| g.element() == element)
    }

    pub fn grid(&self, id: InstanceId) -> Option<&GridInstance> {
        self.grids.iter().find(|g| g.id() == id)
    }

    pub fn grids(&self) -> &[GridInstance] {
        &self.grids
    }

    pub fn events(&self) -> &HostEvents<InstanceId> {
        &self.events
    }

    /************************** Host events ***********************************/

    // Viewport changed: repaint every subscribed instance
    pub fn handle_resize(&mut self, document: &mut Document) -> usize {
        let subscribers = self.events.resize.subscribers().to_vec();
        let mut painted = 0;
        for id in subscribers {
            if let Some(grid) = self.grids.iter_mut().find(|g| g.id() == id) {
                if grid.on_resize(document) {
                    painted += 1;
                }
            }
        }
        painted
    }

    // Polls the visibility watches and activates the instances that fired
    pub fn handle_visibility(&mut self, document: &mut Document) -> Vec<InstanceId> {
        let fired = self.events.visibility.poll(document);
        let mut activated = Vec::with_capacity(fired.len());
        for id in fired {
            if let Some(grid) = self.grids.iter_mut().find(|g| g.id() == id) {
                if grid.initialize(document, &mut self.events) {
                    activated.push(id);
                }
            }
        }
        activated
    }
}

fn resolve_targets(document: &Document, target: &Target) -> Result<Vec<ElementId>, GridError> {
    match target {
        Target::Selector(selector) => document
            .query_selector_all(selector)
            .map_err(|e| GridError::from_selector(selector, e)),
        Target::Element(element) => {
            if document.contains(*element) {
                Ok(vec![*element])
            } else {
                Err(GridError::UnknownElement(*element))
            }
        }
        Target::Elements(elements) => {
            if let Some(missing) = elements.iter().find(|e| !document.contains(**e)) {
                return Err(GridError::UnknownElement(*missing));
            }
            Ok(elements.clone())
        }
    }
}
