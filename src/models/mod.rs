pub mod data_model;
pub mod geometry;
pub mod grid_spec;

pub use data_model::{GridOptions, OptionsError, Target};
pub use geometry::{raster_pt, GridLine, LogicalRect, LogicalSize, RasterPoint};
pub use grid_spec::{AttributeSource, GridSpec, UnknownValue, Units, Variant, DEFAULT_COLUMNS};
