//! Item identifiers
//!
//! An item *kind* names a catalog entry (the shape and display metadata shared
//! by every copy of an item). An item *id* names one instance of a kind.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Stable key of an item type in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemKind(pub u32);

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind#{}", self.0)
    }
}

/// Identity of one item instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

impl ItemId {
    /// Get the raw value
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item instance together with its kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Instance identity
    pub id: ItemId,
    /// Catalog key
    pub kind: ItemKind,
}

impl Item {
    /// Create an item handle
    #[inline]
    pub const fn new(id: ItemId, kind: ItemKind) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {} ({})", self.id, self.kind)
    }
}

/// Thread-safe ID generator
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a new ID generator, starting at 1
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator whose first ID is `first`
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Generate the next unique ID
    pub fn next(&self) -> ItemId {
        ItemId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure IDs up to and including `id` are never handed out again
    pub fn reserve(&self, id: ItemId) {
        self.next.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("next", &self.next.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generator() {
        let gen = IdGenerator::new();
        let a = gen.next();
        let b = gen.next();
        assert_ne!(a, b);
        assert_eq!(b.raw(), a.raw() + 1);
    }

    #[test]
    fn test_reserve_skips_taken_ids() {
        let gen = IdGenerator::new();
        gen.reserve(ItemId(10));
        assert_eq!(gen.next(), ItemId(11));

        // Reserving below the cursor is a no-op
        gen.reserve(ItemId(3));
        assert_eq!(gen.next(), ItemId(12));
    }

    #[test]
    fn test_reserve_max_id_does_not_overflow() {
        let gen = IdGenerator::new();
        gen.reserve(ItemId(u64::MAX));
        assert_eq!(gen.next(), ItemId(u64::MAX));
    }
}
