//! Inventory events

use satchel_core::{Coord, Item};

/// Notifications emitted by the placement engine.
///
/// Exactly one `Placed` or `Removed` is emitted per successful operation and
/// none for a refused one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Item committed to the grid (fresh placement or move)
    Placed { item: Item, anchor: Coord },
    /// Item lifted off the grid
    Removed { item: Item, anchor: Coord },
    /// Removed item handed back to the unplaced pool
    ReturnedToPool { item: Item },
}

impl InventoryEvent {
    /// The item this event is about
    pub fn item(&self) -> Item {
        match self {
            Self::Placed { item, .. } | Self::Removed { item, .. } | Self::ReturnedToPool { item } => *item,
        }
    }

    /// Anchor carried by the event, if any
    pub fn anchor(&self) -> Option<Coord> {
        match self {
            Self::Placed { anchor, .. } | Self::Removed { anchor, .. } => Some(*anchor),
            Self::ReturnedToPool { .. } => None,
        }
    }

    /// Check if this is a placement
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    /// Check if this is a removal
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}
