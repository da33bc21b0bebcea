//! # satchel_core - Satchel Core
//!
//! Zero-dependency primitives shared by every Satchel crate:
//! - **Coordinates**: integer cell positions and offsets on a board
//! - **Identifiers**: item instances (`ItemId`) and item types (`ItemKind`)
//!
//! Enable the `serde` feature to (de)serialize these types from config files.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod coord;
pub mod id;

pub use coord::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::coord::Coord;
    pub use crate::id::{IdGenerator, Item, ItemId, ItemKind};
}
