// src/services/mod.rs
// Host collaborators the grid controllers talk to

pub mod document;
pub mod events;
pub mod resize;
pub mod selector;
pub mod visibility;

pub use document::{Document, Element, ElementId, Position, Viewport};
pub use events::HostEvents;
pub use resize::ResizeListeners;
pub use selector::{HostElement, SelectorError, SelectorList};
pub use visibility::{VisibilityObserver, VISIBILITY_THRESHOLD};
