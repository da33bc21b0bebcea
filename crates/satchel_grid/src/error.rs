//! Error and rejection types

use satchel_core::{Coord, ItemId, ItemKind};
use std::fmt;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither toml nor json
    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    /// Two catalog entries share a kind
    #[error("Item kind {0} registered twice")]
    DuplicateKind(ItemKind),
    /// Reference to a kind missing from the catalog
    #[error("Unknown item kind: {0}")]
    UnknownKind(ItemKind),
}

/// Why a placement was refused.
///
/// Refusal is an ordinary outcome, not a failure: callers typically turn it
/// into an "invalid" highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The item's kind is not in the catalog
    UnknownKind(ItemKind),
    /// The shape has no occupied cell
    EmptyShape,
    /// A footprint cell is off the board
    OutOfBounds(Coord),
    /// A footprint cell is outside the board outline
    Blocked(Coord),
    /// A footprint cell belongs to another item
    Occupied { at: Coord, by: ItemId },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "unknown item kind {}", kind),
            Self::EmptyShape => write!(f, "shape has no occupied cells"),
            Self::OutOfBounds(at) => write!(f, "cell {} is off the board", at),
            Self::Blocked(at) => write!(f, "cell {} is not part of the board", at),
            Self::Occupied { at, by } => write!(f, "cell {} is occupied by item {}", at, by),
        }
    }
}
