//! Data-driven key layouts
//!
//! A layout is a list of named pads; each key either inserts something
//! (a flat token or a template) or triggers an editor action.
//!
//! # Loading Layouts
//!
//! ```
//! use formula_editor::keys::{KeyAction, KeyLayout};
//!
//! let layout = KeyLayout::default();
//! let key = layout.find("\\sqrt").unwrap();
//! assert_eq!(key.action, KeyAction::Insert);
//! ```

mod config;
mod layout;

pub use config::{
    load_layout_file, parse_layout_yaml, validate_template, KeyConfig, KeyError, LayoutConfig,
    PadConfig,
};
pub use layout::{Key, KeyAction, KeyLayout, Pad, DEFAULT_LAYOUT_YAML};
