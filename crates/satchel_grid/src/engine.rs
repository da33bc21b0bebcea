//! Placement engine
//!
//! The engine is the only writer of grid state and the single source of truth
//! for where each item sits. Every command is check-then-commit: a refused
//! placement returns before anything is written, so the grid, the placement
//! map, the pool and the event stream are left exactly as they were.

use crate::catalog::ItemCatalog;
use crate::error::Rejection;
use crate::events::InventoryEvent;
use crate::grid::{BoardLayout, Cell, Grid};
use crate::pool::UnplacedPool;
use crate::shape::ShapeDefinition;
use satchel_core::{Coord, IdGenerator, Item, ItemId, ItemKind};
use satchel_event::{EventBus, EventChannel, Priority, SubscriberId};
use std::collections::HashMap;
use std::sync::Arc;

/// Absolute cells covered by `shape` when anchored at `anchor`.
///
/// Pure: the grid is not consulted, so cells may lie off the board. Cells
/// whose coordinates overflow `i32` are skipped.
pub fn compute_occupied_cells(
    shape: &ShapeDefinition,
    anchor: Coord,
) -> impl Iterator<Item = Coord> + Clone + '_ {
    shape.offsets().filter_map(move |offset| anchor.checked_add(offset))
}

/// Where a placed item sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The item
    pub item: Item,
    /// Anchor (top-left corner of the shape's bounding box)
    pub anchor: Coord,
}

/// What happens to an item after it leaves the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    /// Lifted for a drag; the caller keeps the item
    Pickup,
    /// Handed back to the unplaced pool
    ReturnToPool,
}

/// Shape-aware inventory for one board
pub struct PlacementEngine {
    pub(crate) grid: Grid,
    pub(crate) catalog: Arc<ItemCatalog>,
    pub(crate) placed: HashMap<ItemId, Placement>,
    pub(crate) pool: UnplacedPool,
    ids: IdGenerator,
    observers: EventBus<InventoryEvent>,
    events: EventChannel<InventoryEvent>,
}

impl PlacementEngine {
    /// Create an engine over an existing grid
    pub fn new(grid: Grid, catalog: Arc<ItemCatalog>) -> Self {
        log::info!(
            "Inventory grid {}x{} ({} usable cells), {} item kinds",
            grid.rows(),
            grid.columns(),
            grid.displayable_count(),
            catalog.len()
        );

        Self {
            grid,
            catalog,
            placed: HashMap::new(),
            pool: UnplacedPool::new(),
            ids: IdGenerator::new(),
            observers: EventBus::new(),
            events: EventChannel::new(),
        }
    }

    /// Create an engine from an authored layout
    pub fn with_layout(layout: &BoardLayout, catalog: Arc<ItemCatalog>) -> Self {
        Self::new(Grid::new(layout), catalog)
    }

    /// Read-only view of the board
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The item catalog
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Items not on the grid
    pub fn pool(&self) -> &UnplacedPool {
        &self.pool
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Cell at `(row, col)`, or `None` off the board
    pub fn query(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.cell_at(row, col)
    }

    /// Item covering `coord`
    pub fn item_at(&self, coord: Coord) -> Option<Item> {
        self.grid.cell(coord)?.occupying_item()
    }

    /// Footprint of `item` at `anchor`. Empty for an unknown kind.
    pub fn compute_occupied_cells(&self, item: &Item, anchor: Coord) -> Vec<Coord> {
        match self.catalog.shape(item.kind) {
            Some(shape) => compute_occupied_cells(shape, anchor).collect(),
            None => Vec::new(),
        }
    }

    /// Current footprint of a placed item
    pub fn footprint(&self, id: ItemId) -> Option<Vec<Coord>> {
        let placement = self.placed.get(&id)?;
        Some(self.compute_occupied_cells(&placement.item, placement.anchor))
    }

    /// Current anchor of an item
    pub fn anchor_of(&self, id: ItemId) -> Option<Coord> {
        self.placed.get(&id).map(|p| p.anchor)
    }

    /// Check if an item is on the grid
    pub fn is_placed(&self, id: ItemId) -> bool {
        self.placed.contains_key(&id)
    }

    /// All placements, ordered by item ID
    pub fn placed(&self) -> Vec<Placement> {
        let mut placements: Vec<_> = self.placed.values().copied().collect();
        placements.sort_by_key(|p| p.item.id);
        placements
    }

    /// Number of items on the grid
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Explain whether `item` may sit at `anchor`.
    ///
    /// Cells already covered by `item` itself do not block it, so an item can
    /// be re-validated where it lies without vacating first.
    pub fn check_placement(&self, item: &Item, anchor: Coord) -> Result<(), Rejection> {
        let shape = self
            .catalog
            .shape(item.kind)
            .ok_or(Rejection::UnknownKind(item.kind))?;

        if shape.is_degenerate() {
            return Err(Rejection::EmptyShape);
        }

        let mut covered = 0usize;
        for at in compute_occupied_cells(shape, anchor) {
            covered += 1;

            let cell = self.grid.cell(at).ok_or(Rejection::OutOfBounds(at))?;
            if !cell.is_displayable() {
                return Err(Rejection::Blocked(at));
            }
            if let Some(by) = cell.occupant() {
                if by != item.id {
                    return Err(Rejection::Occupied { at, by });
                }
            }
        }

        // Some footprint cells lie past the coordinate range
        if covered != shape.occupied_count() {
            return Err(Rejection::OutOfBounds(anchor));
        }
        Ok(())
    }

    /// Whether `item` may sit at `anchor`. Has no side effects.
    pub fn can_place(&self, item: &Item, anchor: Coord) -> bool {
        self.check_placement(item, anchor).is_ok()
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Place or move `item` so that it is anchored at `anchor`.
    ///
    /// On refusal nothing changes and false is returned. A move vacates the
    /// old footprint without the pool side effect of [`remove`](Self::remove)
    /// and emits a single `Placed` event.
    pub fn place(&mut self, item: Item, anchor: Coord) -> bool {
        if let Err(rejection) = self.check_placement(&item, anchor) {
            log::debug!("Refused {} at {}: {}", item, anchor, rejection);
            return false;
        }

        if let Some(previous) = self.placed.get(&item.id).copied() {
            self.vacate_footprint(&previous);
        }

        if let Some(shape) = self.catalog.shape(item.kind) {
            for at in compute_occupied_cells(shape, anchor) {
                self.grid.occupy(at, item, anchor);
            }
        }

        self.placed.insert(item.id, Placement { item, anchor });
        self.pool.remove(item.id);
        self.ids.reserve(item.id);

        log::debug!("Placed {} at {}", item, anchor);
        self.emit(InventoryEvent::Placed { item, anchor });
        true
    }

    /// Take an item off the grid.
    ///
    /// Returns `None` if the item is not placed. Footprint cells that are no
    /// longer on the board are skipped.
    pub fn remove(&mut self, id: ItemId, mode: RemoveMode) -> Option<Item> {
        let placement = self.placed.remove(&id)?;
        self.vacate_footprint(&placement);

        let Placement { item, anchor } = placement;
        log::debug!("Removed {} from {} ({:?})", item, anchor, mode);
        self.emit(InventoryEvent::Removed { item, anchor });

        if mode == RemoveMode::ReturnToPool && self.pool.add(item) {
            self.emit(InventoryEvent::ReturnedToPool { item });
        }

        Some(item)
    }

    /// Lift an item off the grid without returning it to the pool
    pub fn pickup(&mut self, id: ItemId) -> Option<Item> {
        self.remove(id, RemoveMode::Pickup)
    }

    /// Create a new instance of `kind` in the unplaced pool
    pub fn spawn(&mut self, kind: ItemKind) -> Option<Item> {
        if !self.catalog.contains(kind) {
            log::warn!("Cannot spawn unknown item kind {}", kind);
            return None;
        }

        let item = Item::new(self.ids.next(), kind);
        self.pool.add(item);
        log::debug!("Spawned {}", item);
        Some(item)
    }

    /// Put an externally created item into the pool.
    ///
    /// Refused for unknown kinds and for items already on the grid or pooled.
    pub fn add_to_pool(&mut self, item: Item) -> bool {
        if !self.catalog.contains(item.kind) || self.placed.contains_key(&item.id) {
            return false;
        }
        if !self.pool.add(item) {
            return false;
        }
        self.ids.reserve(item.id);
        true
    }

    /// Take an item out of the pool
    pub fn take_from_pool(&mut self, id: ItemId) -> Option<Item> {
        self.pool.remove(id)
    }

    /// Rebuild the grid from a new layout, discarding every placement.
    ///
    /// Returns the items that were on the board, ordered by ID. No events are
    /// emitted for them.
    pub fn reinitialize(&mut self, layout: &BoardLayout) -> Vec<Item> {
        let cleared: Vec<Item> = self.placed().into_iter().map(|p| p.item).collect();

        self.grid = Grid::new(layout);
        self.placed.clear();

        log::info!(
            "Inventory grid reinitialized to {}x{}, {} items cleared",
            self.grid.rows(),
            self.grid.columns(),
            cleared.len()
        );
        cleared
    }

    fn vacate_footprint(&mut self, placement: &Placement) {
        // Placed kinds are always in the catalog: `place` refuses unknown ones
        let Some(shape) = self.catalog.shape(placement.item.kind) else {
            return;
        };
        for at in compute_occupied_cells(shape, placement.anchor) {
            if self.grid.cell(at).and_then(Cell::occupant) == Some(placement.item.id) {
                self.grid.vacate(at);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    /// Register an observer
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Register an observer with delivery priority
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe_with_priority(handler, priority)
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        self.events.drain()
    }

    pub(crate) fn emit(&mut self, event: InventoryEvent) {
        self.observers.publish(&event);
        self.events.send(event);
    }
}

impl std::fmt::Debug for PlacementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementEngine")
            .field("rows", &self.grid.rows())
            .field("columns", &self.grid.columns())
            .field("placed", &self.placed.len())
            .field("pooled", &self.pool.len())
            .finish()
    }
}
