//! Item catalog
//!
//! Shapes and display metadata keyed by [`ItemKind`]. The catalog is authored
//! data: the placement engine reads it and never writes to it.

use crate::error::ConfigError;
use crate::shape::ShapeDefinition;
use satchel_core::ItemKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Catalog key
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Icon path
    pub icon: Option<String>,
    /// Footprint
    pub shape: ShapeDefinition,
    /// Preferred preview width in the unplaced list (0 = automatic)
    pub preview_width: f32,
}

impl ItemDefinition {
    /// Create a 1x1 item definition
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            icon: None,
            shape: ShapeDefinition::single(),
            preview_width: 0.0,
        }
    }

    /// Set shape
    pub fn with_shape(mut self, shape: ShapeDefinition) -> Self {
        self.shape = shape;
        self
    }

    /// Set icon path
    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(path.into());
        self
    }

    /// Set preview width
    pub fn with_preview_width(mut self, width: f32) -> Self {
        self.preview_width = width.max(0.0);
        self
    }
}

/// Lookup table from item kind to definition
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    definitions: BTreeMap<ItemKind, ItemDefinition>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, repairing its shape first
    pub fn register(&mut self, mut definition: ItemDefinition) -> Result<(), ConfigError> {
        if self.definitions.contains_key(&definition.kind) {
            return Err(ConfigError::DuplicateKind(definition.kind));
        }

        if definition.shape.normalize() {
            log::warn!(
                "Shape of '{}' ({}) was malformed and has been normalized to {}x{}",
                definition.name,
                definition.kind,
                definition.shape.width(),
                definition.shape.height()
            );
        }
        if definition.shape.is_degenerate() {
            log::warn!(
                "Shape of '{}' ({}) has no occupied cells; it can never be placed",
                definition.name,
                definition.kind
            );
        }

        self.definitions.insert(definition.kind, definition);
        Ok(())
    }

    /// Register a definition, builder style
    pub fn with(mut self, definition: ItemDefinition) -> Result<Self, ConfigError> {
        self.register(definition)?;
        Ok(self)
    }

    /// Get a definition
    pub fn get(&self, kind: ItemKind) -> Option<&ItemDefinition> {
        self.definitions.get(&kind)
    }

    /// Get the shape of a kind
    pub fn shape(&self, kind: ItemKind) -> Option<&ShapeDefinition> {
        self.definitions.get(&kind).map(|d| &d.shape)
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: ItemKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions, ordered by kind
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.values()
    }
}
