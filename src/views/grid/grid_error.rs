// src/views/grid/grid_error.rs

use thiserror::Error;

use crate::services::{ElementId, SelectorError};

// Registration-time failures. Paint passes never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("No selector for elements given")]
    InvalidTarget,
    #[error("Invalid selector: {selector}")]
    InvalidSelector { selector: String },
    #[error("Element {0:?} is not part of the document")]
    UnknownElement(ElementId),
    #[error("Column count must be at least 1, got {0}")]
    InvalidColumnCount(u32),
}

impl GridError {
    pub(crate) fn from_selector(selector: &str, err: SelectorError) -> Self {
        match err {
            SelectorError::Empty => GridError::InvalidTarget,
            SelectorError::Syntax(_) => GridError::InvalidSelector {
                selector: selector.to_string(),
            },
        }
    }
}
