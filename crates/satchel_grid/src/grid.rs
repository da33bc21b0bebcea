//! Board storage
//!
//! The grid stores cells and nothing else. It performs no legality checks:
//! `occupy` and `vacate` are unconditional writes reserved for the placement
//! engine, which owns the rules.

use satchel_core::{Coord, Item, ItemId};
use std::fmt;

/// One board position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    displayable: bool,
    occupant: Option<Occupant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occupant {
    item: Item,
    anchor: Coord,
}

impl Cell {
    /// Create an empty cell
    pub const fn new(displayable: bool) -> Self {
        Self {
            displayable,
            occupant: None,
        }
    }

    /// Part of the usable board outline
    pub fn is_displayable(&self) -> bool {
        self.displayable
    }

    /// Covered by a placed item
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Displayable and unoccupied
    pub fn is_free(&self) -> bool {
        self.displayable && self.occupant.is_none()
    }

    /// ID of the item covering this cell
    pub fn occupant(&self) -> Option<ItemId> {
        self.occupant.map(|o| o.item.id)
    }

    /// The item covering this cell
    pub fn occupying_item(&self) -> Option<Item> {
        self.occupant.map(|o| o.item)
    }

    /// Anchor of the item covering this cell
    pub fn anchor(&self) -> Option<Coord> {
        self.occupant.map(|o| o.anchor)
    }
}

/// Authored board outline, consumed once at grid construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardLayout {
    /// Every cell displayable
    Uniform { rows: usize, columns: usize },
    /// Row-major displayability mask
    Mask {
        rows: usize,
        columns: usize,
        cells: Vec<bool>,
    },
}

impl BoardLayout {
    /// Rectangular board
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self::Uniform { rows, columns }
    }

    /// Board from an explicit mask
    pub fn from_mask(rows: usize, columns: usize, cells: Vec<bool>) -> Self {
        Self::Mask {
            rows,
            columns,
            cells,
        }
    }

    /// Board from text rows (`#` or `1` = displayable)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = vec![false; width * height];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.as_ref().chars().enumerate() {
                cells[r * width + c] = matches!(ch, '#' | '1');
            }
        }

        Self::from_mask(height, width, cells)
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::Uniform { rows, columns } | Self::Mask { rows, columns, .. } => (*rows, *columns),
        }
    }

    /// Displayability of one cell. Mask entries past the end are blocked.
    pub fn is_displayable(&self, row: usize, col: usize) -> bool {
        match self {
            Self::Uniform { .. } => true,
            Self::Mask { columns, cells, .. } => {
                cells.get(row * columns + col).copied().unwrap_or(false)
            }
        }
    }
}

/// `rows x columns` board of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from an authored layout
    pub fn new(layout: &BoardLayout) -> Self {
        let (rows, columns) = layout.dimensions();

        if let BoardLayout::Mask { cells, .. } = layout {
            if cells.len() != rows * columns {
                log::warn!(
                    "Board mask has {} cells but the board is {}x{}; missing cells are blocked",
                    cells.len(),
                    rows,
                    columns
                );
            }
        }

        Self::with_predicate(rows, columns, |r, c| layout.is_displayable(r, c))
    }

    /// Every cell displayable
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self::with_predicate(rows, columns, |_, _| true)
    }

    /// Build from a per-cell displayability predicate `(row, col) -> bool`
    pub fn with_predicate(rows: usize, columns: usize, displayable: impl Fn(usize, usize) -> bool) -> Self {
        if rows == 0 || columns == 0 {
            log::warn!("Board of {}x{} clamped to at least 1x1", rows, columns);
        }
        let rows = rows.max(1);
        let columns = columns.max(1);

        let mut cells = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                cells.push(Cell::new(displayable(r, c)));
            }
        }

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether `coord` lies on the board
    #[inline]
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.columns && (coord.y as usize) < self.rows
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        if self.is_in_bounds(coord) {
            Some(coord.y as usize * self.columns + coord.x as usize)
        } else {
            None
        }
    }

    /// Cell at `(row, col)`, or `None` off the board
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + col)
    }

    /// Cell at `coord`, or `None` off the board
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Mark a cell as covered by `item` anchored at `anchor`
    pub(crate) fn occupy(&mut self, coord: Coord, item: Item, anchor: Coord) {
        if let Some(i) = self.index(coord) {
            debug_assert!(self.cells[i].displayable, "occupying blocked cell {}", coord);
            self.cells[i].occupant = Some(Occupant { item, anchor });
        }
    }

    /// Clear a cell. Off-board coordinates are skipped.
    pub(crate) fn vacate(&mut self, coord: Coord) {
        if let Some(i) = self.index(coord) {
            self.cells[i].occupant = None;
        }
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::from_row_col(i / columns, i % columns), cell))
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Number of displayable cells
    pub fn displayable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_displayable()).count()
    }
}

/// Glyph used when printing an occupied cell
fn item_glyph(id: ItemId) -> char {
    (b'A' + (id.raw() % 26) as u8) as char
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.columns {
                let cell = &self.cells[r * self.columns + c];
                let ch = match cell.occupant() {
                    Some(id) => item_glyph(id),
                    None if cell.displayable => '#',
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
