// src/services/resize.rs
// Viewport resize subscriptions. Delivery order is subscription order.

#[derive(Debug, Clone)]
pub struct ResizeListeners<K> {
    subscribers: Vec<K>,
}

impl<K> Default for ResizeListeners<K> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> ResizeListeners<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns false if the key was already subscribed
    pub fn subscribe(&mut self, key: K) -> bool {
        if self.is_subscribed(key) {
            return false;
        }
        self.subscribers.push(key);
        true
    }

    pub fn unsubscribe(&mut self, key: K) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|k| *k != key);
        self.subscribers.len() != before
    }

    pub fn is_subscribed(&self, key: K) -> bool {
        self.subscribers.contains(&key)
    }

    pub fn subscribers(&self) -> &[K] {
        &self.subscribers
    }
}
