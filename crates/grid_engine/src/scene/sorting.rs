//! Sorting index
//!
//! Registry handles kept in ascending `sorting_order`. The index does not
//! watch entities; whoever changes an order asks for a resort.

use crate::foundation::collections::EntityKey;

/// Handles in draw/update order
#[derive(Debug, Default, Clone)]
pub struct SortingIndex {
    keys: Vec<EntityKey>,
}

impl SortingIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle; call [`resort`](Self::resort) afterwards
    pub fn push(&mut self, key: EntityKey) {
        self.keys.push(key);
    }

    /// Drop a handle, keeping the others in order
    pub fn remove(&mut self, key: EntityKey) -> bool {
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sort ascending by the order `order_of` reports for each handle
    ///
    /// The sort is stable: equal orders keep their previous relative order,
    /// which for untouched entities is insertion order.
    pub fn resort(&mut self, order_of: impl Fn(EntityKey) -> i32) {
        self.keys.sort_by_key(|key| order_of(*key));
    }

    /// Handle at a sorted position
    pub fn get(&self, index: usize) -> Option<EntityKey> {
        self.keys.get(index).copied()
    }

    /// Handles in order
    pub fn keys(&self) -> &[EntityKey] {
        &self.keys
    }

    /// Copy of the current order, used to walk a frame pass
    pub fn snapshot(&self) -> Vec<EntityKey> {
        self.keys.clone()
    }

    /// Number of handles
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
