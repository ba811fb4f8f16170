// src/views/mod.rs

pub mod grid;

pub use grid::{GridError, GridInstance, GridManager, GridState, InstanceId};
