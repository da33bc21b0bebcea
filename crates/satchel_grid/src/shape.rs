//! Item shapes
//!
//! A shape is a boolean occupancy matrix over a `width x height` bounding box,
//! stored row-major: cell `(x, y)` is occupied iff `cells[y * width + x]`.
//! Placement only ever looks at the offsets of occupied cells relative to the
//! top-left corner of the box (the item's anchor).

use satchel_core::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy matrix of an item type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ShapeDefinition {
    /// Create a solid (fully occupied) shape
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    /// A single occupied cell
    pub fn single() -> Self {
        Self::new(1, 1)
    }

    /// Create a shape from raw authored data.
    ///
    /// Nothing is validated here; a mismatched matrix is kept as-is until
    /// [`normalize`](Self::normalize) is called.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse a shape from text rows.
    ///
    /// `#`, `X`, `x` and `1` mark occupied cells, anything else is empty. The
    /// box is as wide as the longest row; short rows are padded with empty
    /// cells. No rows, or only empty ones, give a degenerate 1x1 shape with
    /// no occupied cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        if width == 0 || height == 0 {
            log::warn!("Empty shape rows; the shape has no occupied cells");
            return Self::from_cells(1, 1, vec![false]);
        }

        let mut cells = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                cells[y * width + x] = matches!(ch, '#' | 'X' | 'x' | '1');
            }
        }

        let mut shape = Self::from_cells(width, height, cells);
        shape.normalize();
        shape
    }

    /// Bounding box width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Bounding box height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounding box as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells in the bounding box
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw row-major matrix
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Whether `(x, y)` is part of the shape. False outside the box.
    pub fn cell(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells.get(y * self.width + x).copied().unwrap_or(false)
    }

    /// Write one matrix entry. Coordinates outside the box are ignored.
    pub fn set_cell(&mut self, x: usize, y: usize, occupied: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        if self.needs_normalize() {
            self.normalize();
        }
        self.cells[y * self.width + x] = occupied;
    }

    /// Offsets of occupied cells in row-major order.
    ///
    /// The iterator borrows the shape and can be cloned to restart.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            shape: self,
            index: 0,
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.offsets().count()
    }

    /// A shape with no occupied cell can never be placed
    pub fn is_degenerate(&self) -> bool {
        self.offsets().next().is_none()
    }

    /// Whether the dimensions or the matrix length are malformed
    pub fn needs_normalize(&self) -> bool {
        self.width == 0 || self.height == 0 || self.cells.len() != self.width * self.height
    }

    /// Repair malformed authored data.
    ///
    /// Dimensions are clamped to at least 1. A matrix of the wrong length keeps
    /// its leading row-major entries; missing entries become occupied.
    /// Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;

        if self.width == 0 {
            self.width = 1;
            changed = true;
        }
        if self.height == 0 {
            self.height = 1;
            changed = true;
        }

        let required = self.width * self.height;
        if self.cells.len() != required {
            self.cells.resize(required, true);
            changed = true;
        }

        changed
    }

    /// Change the bounding box.
    ///
    /// Cells inside both the old and the new box keep their value; cells
    /// introduced by growing are occupied.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.normalize();

        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![true; width * height];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[y * width + x] = self.cells[y * self.width + x];
            }
        }

        self.width = width;
        self.height = height;
        self.cells = cells;
    }
}

impl Default for ShapeDefinition {
    fn default() -> Self {
        Self::single()
    }
}

impl fmt::Display for ShapeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.cell(x, y) { "#" } else { "." })?;
            }
            if y + 1 < self.height {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Row-major iterator over the occupied offsets of a shape
#[derive(Debug, Clone)]
pub struct Offsets<'a> {
    shape: &'a ShapeDefinition,
    index: usize,
}

impl Iterator for Offsets<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let width = self.shape.width;
        let total = self.shape.cell_count();

        while self.index < total {
            let i = self.index;
            self.index += 1;

            let (x, y) = (i % width, i / width);
            if self.shape.cell(x, y) {
                return Some(Coord::new(x as i32, y as i32));
            }
        }
        None
    }
}
