// src/services/visibility.rs
//
// One-shot intersection watches. A watch fires the first time its element
// shows at least `threshold` of its area inside the viewport, then disarms.

use log::debug;

use crate::services::{Document, ElementId};

// Smallest threshold that still fires once any area becomes visible
pub const VISIBILITY_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
struct Watch<K> {
    key: K,
    element: ElementId,
    threshold: f64,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver<K> {
    watches: Vec<Watch<K>>,
}

impl<K> Default for VisibilityObserver<K> {
    fn default() -> Self {
        Self {
            watches: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> VisibilityObserver<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // Arms a watch; re-observing the same key replaces the old watch
    pub fn observe(&mut self, key: K, element: ElementId, threshold: f64) {
        self.unobserve(key);
        self.watches.push(Watch {
            key,
            element,
            threshold: threshold.clamp(0.0, 1.0),
        });
    }

    pub fn unobserve(&mut self, key: K) {
        self.watches.retain(|w| w.key != key);
    }

    pub fn is_observing(&self, key: K) -> bool {
        self.watches.iter().any(|w| w.key == key)
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Checks every armed watch against the document and returns the keys
    /// that fired, in registration order. Fired watches are removed.
    pub fn poll(&mut self, document: &Document) -> Vec<K> {
        let mut fired = Vec::new();
        self.watches.retain(|w| {
            let ratio = document.visible_ratio(w.element);
            let intersecting = ratio > 0.0 && ratio >= w.threshold;
            if intersecting {
                debug!(
                    "Visibility watch {:?} fired for {:?} at ratio {:.3}",
                    w.key, w.element, ratio
                );
                fired.push(w.key);
            }
            !intersecting
        });
        fired
    }
}
