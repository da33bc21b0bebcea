//! Unplaced pool
//!
//! Items that exist but sit on no grid: freshly spawned items, and items
//! returned from the grid by a removal.

use satchel_core::{Item, ItemId};

/// Ordered set of items not on the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnplacedPool {
    items: Vec<Item>,
}

impl UnplacedPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns false if its ID is already pooled.
    pub fn add(&mut self, item: Item) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item by ID
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Check if an item is pooled
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Get a pooled item
    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.items.iter().find(|i| i.id == id).copied()
    }

    /// Pooled items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Number of pooled items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
