//! Satchel Grid - Shape-Aware Grid Inventory
//!
//! Items occupy arbitrary footprints on a 2D board of cells. This crate
//! validates and commits placements, supports pickup/move/return cycles and
//! answers overlap queries.
//!
//! # Features
//!
//! - Occupancy-matrix item shapes with explicit normalization
//! - Irregular boards (blocked cells outside the usable outline)
//! - Atomic place/move/remove with observer notifications
//! - Unplaced pool and drag sessions
//! - TOML/JSON inventory configuration
//!
//! # Example
//!
//! ```ignore
//! use satchel_grid::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = ItemCatalog::new()
//!     .with(ItemDefinition::new(ItemKind(1), "Pistol")
//!         .with_shape(ShapeDefinition::from_rows(&["##", "#."])))?;
//!
//! let mut engine = PlacementEngine::new(Grid::uniform(6, 8), Arc::new(catalog));
//! let pistol = engine.spawn(ItemKind(1)).unwrap();
//! assert!(engine.place(pistol, Coord::new(0, 0)));
//! ```

pub mod catalog;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod pool;
pub mod shape;

pub mod prelude {
    pub use crate::catalog::{ItemCatalog, ItemDefinition};
    pub use crate::config::InventoryConfig;
    pub use crate::drag::{DragOrigin, DragSession, DropOutcome, Preview};
    pub use crate::engine::{compute_occupied_cells, Placement, PlacementEngine, RemoveMode};
    pub use crate::error::{ConfigError, Rejection};
    pub use crate::events::InventoryEvent;
    pub use crate::grid::{BoardLayout, Cell, Grid};
    pub use crate::pool::UnplacedPool;
    pub use crate::shape::ShapeDefinition;
    pub use satchel_core::{Coord, Item, ItemId, ItemKind};
    pub use satchel_event::{Priority, SubscriberId};
}

pub use prelude::*;
