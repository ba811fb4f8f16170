// src/views/grid/mod.rs

pub mod grid_error;
pub mod grid_instance;
pub mod grid_manager;

pub use grid_error::GridError;
pub use grid_instance::{GridInstance, GridState, InstanceId};
pub use grid_manager::GridManager;
