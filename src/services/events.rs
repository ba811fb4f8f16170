// src/services/events.rs
// The two host notification sources a grid controller can be armed on

use crate::services::{ResizeListeners, VisibilityObserver};

#[derive(Debug, Clone)]
pub struct HostEvents<K> {
    pub visibility: VisibilityObserver<K>,
    pub resize: ResizeListeners<K>,
}

impl<K> Default for HostEvents<K> {
    fn default() -> Self {
        Self {
            visibility: VisibilityObserver::default(),
            resize: ResizeListeners::default(),
        }
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> HostEvents<K> {
    pub fn new() -> Self {
        Self::default()
    }
}
