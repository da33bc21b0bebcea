//! Drag sessions
//!
//! The grid half of a drag-and-drop gesture, without any pointer handling:
//! lift an item (from the grid or the pool), ask for previews while hovering,
//! then drop it on a cell or outside the board.

use crate::engine::{PlacementEngine, RemoveMode};
use crate::events::InventoryEvent;
use satchel_core::{Coord, Item, ItemId};

/// Where a dragged item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// Lifted off the grid from this anchor
    Grid(Coord),
    /// Taken from the unplaced pool
    Pool,
}

/// An item in flight. Consumed by [`PlacementEngine::end_drag`].
#[derive(Debug, PartialEq, Eq)]
pub struct DragSession {
    item: Item,
    origin: DragOrigin,
}

impl DragSession {
    /// The dragged item
    pub fn item(&self) -> Item {
        self.item
    }

    /// Where the drag started
    pub fn origin(&self) -> DragOrigin {
        self.origin
    }
}

/// Hover feedback for one candidate anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Candidate anchor
    pub anchor: Coord,
    /// Footprint cells that are on the board and displayable
    pub cells: Vec<Coord>,
    /// Whether dropping here would succeed
    pub valid: bool,
}

/// Result of ending a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Committed to the grid at this anchor
    Placed(Coord),
    /// Sent to the unplaced pool
    ReturnedToPool,
}

impl PlacementEngine {
    /// Start dragging an item.
    ///
    /// A placed item is picked up (emitting `Removed`); a pooled item is taken
    /// out of the pool. Returns `None` if the item is in neither.
    pub fn begin_drag(&mut self, id: ItemId) -> Option<DragSession> {
        if let Some(anchor) = self.anchor_of(id) {
            let item = self.remove(id, RemoveMode::Pickup)?;
            return Some(DragSession {
                item,
                origin: DragOrigin::Grid(anchor),
            });
        }

        let item = self.pool.remove(id)?;
        Some(DragSession {
            item,
            origin: DragOrigin::Pool,
        })
    }

    /// Feedback for hovering the dragged item at `anchor`
    pub fn preview(&self, session: &DragSession, anchor: Coord) -> Preview {
        let cells = self
            .compute_occupied_cells(&session.item, anchor)
            .into_iter()
            .filter(|&at| self.grid.cell(at).is_some_and(|c| c.is_displayable()))
            .collect();

        Preview {
            anchor,
            cells,
            valid: self.can_place(&session.item, anchor),
        }
    }

    /// Finish a drag.
    ///
    /// `Some(anchor)` tries to place the item there; `None` means it was
    /// released off the board. Anything that does not end on the grid goes to
    /// the unplaced pool.
    pub fn end_drag(&mut self, session: DragSession, target: Option<Coord>) -> DropOutcome {
        let item = session.item;

        if let Some(anchor) = target {
            if self.place(item, anchor) {
                return DropOutcome::Placed(anchor);
            }
        }

        if self.pool.add(item) {
            self.emit(InventoryEvent::ReturnedToPool { item });
        }
        log::debug!("{} returned to pool after drag from {:?}", item, session.origin);
        DropOutcome::ReturnedToPool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemCatalog, ItemDefinition};
    use crate::grid::{BoardLayout, Grid};
    use crate::shape::ShapeDefinition;
    use satchel_core::ItemKind;
    use std::sync::Arc;

    const BAR: ItemKind = ItemKind(1);

    fn engine() -> PlacementEngine {
        let catalog = ItemCatalog::new()
            .with(ItemDefinition::new(BAR, "Bar").with_shape(ShapeDefinition::new(2, 1)))
            .unwrap();
        let layout = BoardLayout::from_rows(&["###", "#.#"]);
        PlacementEngine::new(Grid::new(&layout), Arc::new(catalog))
    }

    #[test]
    fn test_drag_from_pool_to_grid() {
        let mut engine = engine();
        let bar = engine.spawn(BAR).unwrap();

        let session = engine.begin_drag(bar.id).unwrap();
        assert_eq!(session.origin(), DragOrigin::Pool);
        assert!(engine.pool().is_empty());

        assert_eq!(engine.end_drag(session, Some(Coord::new(1, 0))), DropOutcome::Placed(Coord::new(1, 0)));
        assert_eq!(engine.anchor_of(bar.id), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_preview_filters_blocked_cells() {
        let mut engine = engine();
        let bar = engine.spawn(BAR).unwrap();
        let session = engine.begin_drag(bar.id).unwrap();

        // (1, 1) is blocked, (2, 1) is fine
        let preview = engine.preview(&session, Coord::new(1, 1));
        assert_eq!(preview.cells, vec![Coord::new(2, 1)]);
        assert!(!preview.valid);

        // Hanging off the right edge
        let preview = engine.preview(&session, Coord::new(2, 0));
        assert_eq!(preview.cells, vec![Coord::new(2, 0)]);
        assert!(!preview.valid);

        let preview = engine.preview(&session, Coord::new(0, 0));
        assert_eq!(preview.cells.len(), 2);
        assert!(preview.valid);
    }

    #[test]
    fn test_preview_at_extreme_anchor() {
        let mut engine = engine();
        let bar = engine.spawn(BAR).unwrap();
        let session = engine.begin_drag(bar.id).unwrap();

        let extremes = [
            Coord::new(i32::MAX, 0),
            Coord::new(i32::MAX, i32::MAX),
            Coord::new(i32::MIN, -1),
        ];
        for anchor in extremes {
            let preview = engine.preview(&session, anchor);
            assert!(preview.cells.is_empty());
            assert!(!preview.valid);
        }
        assert_eq!(engine.end_drag(session, Some(Coord::new(i32::MAX, 0))), DropOutcome::ReturnedToPool);
    }

    #[test]
    fn test_failed_drop_returns_to_pool() {
        let mut engine = engine();
        let bar = engine.spawn(BAR).unwrap();
        engine.place(bar, Coord::new(0, 0));
        engine.drain_events();

        let session = engine.begin_drag(bar.id).unwrap();
        assert_eq!(session.origin(), DragOrigin::Grid(Coord::new(0, 0)));
        assert_eq!(engine.grid().occupied_count(), 0);

        assert_eq!(engine.end_drag(session, Some(Coord::new(0, 1))), DropOutcome::ReturnedToPool);
        assert!(engine.pool().contains(bar.id));
        assert!(!engine.is_placed(bar.id));

        assert_eq!(
            engine.drain_events(),
            vec![
                InventoryEvent::Removed { item: bar, anchor: Coord::new(0, 0) },
                InventoryEvent::ReturnedToPool { item: bar },
            ]
        );
    }

    #[test]
    fn test_drop_off_board() {
        let mut engine = engine();
        let bar = engine.spawn(BAR).unwrap();
        let session = engine.begin_drag(bar.id).unwrap();

        assert_eq!(engine.end_drag(session, None), DropOutcome::ReturnedToPool);
        assert!(engine.pool().contains(bar.id));
        assert!(engine.begin_drag(ItemId(999)).is_none());
    }
}
