//! Startup configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. First command-line argument: `satchel inventory.toml`
//! 2. Environment variable: `SATCHEL_CONFIG=inventory.json`
//! 3. Built-in default (the irregular 8x9 board)

use satchel_grid::{ConfigError, InventoryConfig};
use std::path::PathBuf;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SATCHEL_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../assets/default.toml");

/// Where the inventory configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line
    Argument(PathBuf),
    /// Path taken from `SATCHEL_CONFIG`
    Environment(PathBuf),
    /// Compiled-in default
    BuiltIn,
}

impl ConfigSource {
    /// Resolve the source from process arguments and an environment lookup
    pub fn resolve(mut args: impl Iterator<Item = String>, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = args.nth(1) {
            return Self::Argument(path.into());
        }
        match env(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::Environment(path.into()),
            _ => Self::BuiltIn,
        }
    }

    /// Load the configuration
    pub fn load(&self) -> Result<InventoryConfig, ConfigError> {
        match self {
            Self::Argument(path) | Self::Environment(path) => InventoryConfig::load(path),
            Self::BuiltIn => InventoryConfig::from_toml_str(DEFAULT_CONFIG),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(path) => write!(f, "{} (argument)", path.display()),
            Self::Environment(path) => write!(f, "{} (${})", path.display(), CONFIG_ENV),
            Self::BuiltIn => write!(f, "built-in default"),
        }
    }
}
