//! KeyLayout - pads of keys and lookup by symbol

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::{load_layout_file, parse_layout_yaml, KeyError};
use crate::config_paths;
use crate::model::KeyDescription;

/// Default key layout YAML embedded at compile time
pub const DEFAULT_LAYOUT_YAML: &str = include_str!("../../keys.yaml");

/// What pressing a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    #[default]
    Insert,
    Delete,
    Clear,
    Left,
    Right,
    Up,
    Down,
    Execute,
    ExpandSelection,
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub label: String,
    pub symbol: String,
    pub action: KeyAction,
    /// What an insert key inserts; `None` for every other action
    pub description: Option<KeyDescription>,
    pub variants: Vec<Key>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub name: String,
    pub keys: Vec<Key>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyLayout {
    pub pads: Vec<Pad>,
}

impl KeyLayout {
    pub fn new(pads: Vec<Pad>) -> Self {
        Self { pads }
    }

    pub fn empty() -> Self {
        Self { pads: Vec::new() }
    }

    /// The layout compiled into the binary
    pub fn embedded() -> Result<Self, KeyError> {
        parse_layout_yaml(DEFAULT_LAYOUT_YAML)
    }

    /// Load a layout, falling back to the embedded one
    ///
    /// Loading order (first hit wins):
    /// 1. `path`, when given
    /// 2. User layout at ~/.config/formula-editor/keys.yaml
    /// 3. Embedded default layout
    pub fn load(path: Option<&Path>) -> Self {
        let user_path = config_paths::keys_file().filter(|p| p.exists());
        let Some(path) = path.or(user_path.as_deref()) else {
            return Self::default();
        };

        match load_layout_file(path) {
            Ok(layout) => {
                tracing::info!(
                    "Loaded key layout from {} ({} keys)",
                    path.display(),
                    layout.key_count()
                );
                layout
            }
            Err(e) => {
                tracing::warn!("Failed to load key layout from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Key with this symbol, searching variants too
    pub fn find(&self, symbol: &str) -> Option<&Key> {
        self.pads
            .iter()
            .flat_map(|pad| pad.keys.iter())
            .find_map(|key| find_in(key, symbol))
    }

    /// Like [`find`](Self::find), as an error for callers that need one
    pub fn get(&self, symbol: &str) -> Result<&Key, KeyError> {
        self.find(symbol)
            .ok_or_else(|| KeyError::UnknownKey(symbol.to_string()))
    }

    pub fn pad(&self, name: &str) -> Option<&Pad> {
        self.pads.iter().find(|pad| pad.name == name)
    }

    /// Number of keys including variants
    pub fn key_count(&self) -> usize {
        fn count(key: &Key) -> usize {
            1 + key.variants.iter().map(count).sum::<usize>()
        }
        self.pads
            .iter()
            .flat_map(|pad| pad.keys.iter())
            .map(count)
            .sum()
    }
}

fn find_in<'a>(key: &'a Key, symbol: &str) -> Option<&'a Key> {
    if key.symbol == symbol {
        return Some(key);
    }
    key.variants.iter().find_map(|variant| find_in(variant, symbol))
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::embedded().unwrap_or_else(|e| {
            tracing::warn!("Failed to parse embedded key layout: {}", e);
            Self::empty()
        })
    }
}
