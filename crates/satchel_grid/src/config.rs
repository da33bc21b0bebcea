//! Inventory configuration
//!
//! An inventory is described by a TOML or JSON file: the board outline, the
//! item catalog and the items present in the unplaced pool at start.
//!
//! # Example Config File
//!
//! ```toml
//! [board]
//! rows = 3
//! columns = 4
//! mask = ["####", ".##.", "####"]   # optional, '#' = usable cell
//!
//! [[items]]
//! kind = 1
//! name = "Sword"
//! shape = ["#", "#", "#"]
//!
//! [[items]]
//! kind = 2
//! name = "Shield"
//! width = 2
//! height = 2
//!
//! [pool]
//! initial = [1, 2]
//! ```

use crate::catalog::{ItemCatalog, ItemDefinition};
use crate::engine::PlacementEngine;
use crate::error::ConfigError;
use crate::grid::BoardLayout;
use crate::shape::ShapeDefinition;
use satchel_core::ItemKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Optional outline, one string per row
    pub mask: Option<Vec<String>>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            mask: None,
        }
    }
}

impl BoardConfig {
    /// Resolve the board outline. `rows` and `columns` win over the mask size.
    pub fn layout(&self) -> BoardLayout {
        let Some(mask) = &self.mask else {
            return BoardLayout::uniform(self.rows, self.columns);
        };

        let ragged = mask.len() != self.rows || mask.iter().any(|r| r.chars().count() != self.columns);
        if ragged {
            log::warn!(
                "Board mask does not match {}x{}; missing cells are blocked",
                self.rows,
                self.columns
            );
        }

        let mut cells = vec![false; self.rows * self.columns];
        for (r, row) in mask.iter().take(self.rows).enumerate() {
            for (c, ch) in row.chars().take(self.columns).enumerate() {
                cells[r * self.columns + c] = matches!(ch, '#' | '1');
            }
        }
        BoardLayout::from_mask(self.rows, self.columns, cells)
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Catalog key
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Icon path
    #[serde(default)]
    pub icon: Option<String>,
    /// Preview width in the unplaced list
    #[serde(default)]
    pub preview_width: f32,
    /// Shape as text rows
    #[serde(default)]
    pub shape: Option<Vec<String>>,
    /// Bounding box width
    #[serde(default)]
    pub width: Option<usize>,
    /// Bounding box height
    #[serde(default)]
    pub height: Option<usize>,
    /// Raw row-major matrix
    #[serde(default)]
    pub cells: Option<Vec<bool>>,
}

impl ItemConfig {
    /// Build the shape.
    ///
    /// Text rows take precedence over a raw matrix; explicit dimensions resize
    /// text rows and frame a raw matrix. With neither, the item is a solid box.
    pub fn shape(&self) -> ShapeDefinition {
        let width = self.width.unwrap_or(1);
        let height = self.height.unwrap_or(1);

        if let Some(rows) = &self.shape {
            let mut shape = ShapeDefinition::from_rows(rows);
            if self.width.is_some() || self.height.is_some() {
                let (w, h) = shape.dimensions();
                shape.resize(self.width.unwrap_or(w), self.height.unwrap_or(h));
            }
            return shape;
        }

        match &self.cells {
            Some(cells) => ShapeDefinition::from_cells(width, height, cells.clone()),
            None => ShapeDefinition::new(width, height),
        }
    }

    /// Build the catalog definition
    pub fn definition(&self) -> ItemDefinition {
        let mut definition = ItemDefinition::new(self.kind, self.name.clone())
            .with_shape(self.shape())
            .with_preview_width(self.preview_width);
        definition.icon = self.icon.clone();
        definition
    }
}

/// Initial pool contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Kinds to spawn, one instance per entry
    pub initial: Vec<ItemKind>,
}

/// Complete inventory configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Board outline
    pub board: BoardConfig,
    /// Item catalog
    pub items: Vec<ItemConfig>,
    /// Unplaced pool
    pub pool: PoolConfig,
}

impl InventoryConfig {
    /// Load from a `.toml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "toml" => Self::from_toml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };

        log::info!("Loaded inventory config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parse JSON
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the item catalog
    pub fn catalog(&self) -> Result<ItemCatalog, ConfigError> {
        let mut catalog = ItemCatalog::new();
        for item in &self.items {
            catalog.register(item.definition())?;
        }
        Ok(catalog)
    }

    /// Build a ready-to-use engine with its pool populated
    pub fn build(&self) -> Result<PlacementEngine, ConfigError> {
        let catalog = Arc::new(self.catalog()?);
        let mut engine = PlacementEngine::with_layout(&self.board.layout(), catalog);

        for &kind in &self.pool.initial {
            engine.spawn(kind).ok_or(ConfigError::UnknownKind(kind))?;
        }
        Ok(engine)
    }
}
