//! Invariant tests for satchel_grid
//!
//! These tests drive the engine with generated command sequences and check
//! the properties that must hold after every step.

use proptest::prelude::*;
use satchel_grid::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

const L: ItemKind = ItemKind(1);
const BAR: ItemKind = ItemKind(2);
const DOT: ItemKind = ItemKind(3);
const SQUARE: ItemKind = ItemKind(4);
const HOLLOW: ItemKind = ItemKind(5);

fn catalog() -> Arc<ItemCatalog> {
    let catalog = ItemCatalog::new()
        .with(ItemDefinition::new(L, "L").with_shape(ShapeDefinition::from_rows(&["#.", "##"])))
        .unwrap()
        .with(ItemDefinition::new(BAR, "Bar").with_shape(ShapeDefinition::new(3, 1)))
        .unwrap()
        .with(ItemDefinition::new(DOT, "Dot"))
        .unwrap()
        .with(ItemDefinition::new(SQUARE, "Square").with_shape(ShapeDefinition::new(2, 2)))
        .unwrap()
        .with(ItemDefinition::new(HOLLOW, "Hollow").with_shape(ShapeDefinition::from_rows(&["..", ".."])))
        .unwrap();
    Arc::new(catalog)
}

fn engine() -> PlacementEngine {
    let layout = BoardLayout::from_rows(&["#####", "#.###", "###.#", "#####", "##.##"]);
    PlacementEngine::with_layout(&layout, catalog())
}

fn items() -> Vec<Item> {
    [L, BAR, DOT, DOT, SQUARE, HOLLOW]
        .iter()
        .enumerate()
        .map(|(i, &kind)| Item::new(ItemId(i as u64 + 1), kind))
        .collect()
}

fn assert_consistent(engine: &PlacementEngine) {
    let mut expected_cells = 0;
    let mut seen = HashSet::new();

    for placement in engine.placed() {
        let footprint = engine.footprint(placement.item.id).unwrap();
        assert!(!footprint.is_empty());

        for at in footprint {
            assert!(seen.insert(at), "cell {} claimed by two items", at);
            let cell = engine.grid().cell(at).expect("footprint off the board");
            assert!(cell.is_displayable());
            assert_eq!(cell.occupant(), Some(placement.item.id));
            assert_eq!(cell.anchor(), Some(placement.anchor));
            expected_cells += 1;
        }
    }

    for (at, cell) in engine.grid().iter() {
        if cell.is_occupied() {
            assert!(cell.is_displayable(), "blocked cell {} is occupied", at);
            assert!(seen.contains(&at), "stale occupant at {}", at);
        } else {
            assert_eq!(cell.anchor(), None);
        }
    }

    assert_eq!(engine.grid().occupied_count(), expected_cells);
}

#[derive(Debug, Clone)]
enum Op {
    Place { slot: usize, x: i32, y: i32 },
    Remove { slot: usize, to_pool: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..6usize, -2..7i32, -2..7i32).prop_map(|(slot, x, y)| Op::Place { slot, x, y }),
        1 => (0..6usize, any::<bool>()).prop_map(|(slot, to_pool)| Op::Remove { slot, to_pool }),
    ]
}

proptest! {
    /// INVARIANT: No overlap, no occupied blocked cell, grid and map agree
    #[test]
    fn invariant_board_stays_consistent(ops in prop::collection::vec(op(), 1..80)) {
        let mut engine = engine();
        let items = items();

        for op in ops {
            match op {
                Op::Place { slot, x, y } => {
                    engine.place(items[slot], Coord::new(x, y));
                }
                Op::Remove { slot, to_pool } => {
                    let mode = if to_pool { RemoveMode::ReturnToPool } else { RemoveMode::Pickup };
                    engine.remove(items[slot].id, mode);
                }
            }
            assert_consistent(&engine);
        }
    }

    /// INVARIANT: A refused placement is a no-op; an accepted one emits one event
    #[test]
    fn invariant_place_is_atomic(ops in prop::collection::vec(op(), 1..60)) {
        let mut engine = engine();
        let items = items();

        for op in ops {
            let (slot, x, y) = match op {
                Op::Place { slot, x, y } => (slot, x, y),
                Op::Remove { slot, .. } => {
                    engine.pickup(items[slot].id);
                    engine.drain_events();
                    continue;
                }
            };

            let item = items[slot];
            let anchor = Coord::new(x, y);
            let grid_before = engine.grid().clone();
            let placed_before = engine.placed();

            let predicted = engine.can_place(&item, anchor);
            prop_assert_eq!(engine.can_place(&item, anchor), predicted);
            prop_assert_eq!(engine.grid(), &grid_before);

            let placed = engine.place(item, anchor);
            prop_assert_eq!(placed, predicted);

            let events = engine.drain_events();
            if placed {
                prop_assert_eq!(events, vec![InventoryEvent::Placed { item, anchor }]);
                prop_assert_eq!(engine.anchor_of(item.id), Some(anchor));
            } else {
                prop_assert!(events.is_empty());
                prop_assert_eq!(engine.grid(), &grid_before);
                prop_assert_eq!(engine.placed(), placed_before);
            }
        }
    }

    /// INVARIANT: place then remove restores every touched cell
    #[test]
    fn invariant_round_trip(slot in 0..5usize, x in 0..5i32, y in 0..5i32) {
        let mut engine = engine();
        let item = items()[slot];
        let anchor = Coord::new(x, y);
        let before = engine.grid().clone();

        if engine.place(item, anchor) {
            prop_assert_eq!(engine.remove(item.id, RemoveMode::Pickup), Some(item));
            prop_assert!(!engine.is_placed(item.id));
        }
        prop_assert_eq!(engine.grid(), &before);
    }
}

/// INVARIANT: A shape without occupied cells is placeable nowhere
#[test]
fn invariant_degenerate_shape_never_placed() {
    let mut engine = engine();
    let hollow = Item::new(ItemId(1), HOLLOW);

    for y in -1..6 {
        for x in -1..6 {
            let anchor = Coord::new(x, y);
            assert_eq!(engine.check_placement(&hollow, anchor), Err(Rejection::EmptyShape));
            assert!(!engine.place(hollow, anchor));
        }
    }
    assert_eq!(engine.placed_count(), 0);
}

/// INVARIANT: A move vacates the old footprint and fills the new one
#[test]
fn invariant_move_vacates_old_footprint() {
    let mut engine = engine();
    let square = Item::new(ItemId(1), SQUARE);

    assert!(engine.place(square, Coord::new(2, 0)));
    assert!(engine.place(square, Coord::new(3, 3)));

    for at in [Coord::new(2, 0), Coord::new(3, 0), Coord::new(2, 1), Coord::new(3, 1)] {
        assert_eq!(engine.grid().cell(at).unwrap().occupant(), None);
    }
    for at in [Coord::new(3, 3), Coord::new(4, 3), Coord::new(3, 4), Coord::new(4, 4)] {
        assert_eq!(engine.grid().cell(at).unwrap().occupant(), Some(square.id));
    }
    assert_eq!(engine.grid().occupied_count(), 4);
}
