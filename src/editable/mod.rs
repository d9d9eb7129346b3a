//! Formula editing over a flat token sequence
//!
//! # Architecture
//!
//! - [`cursor`]: horizontal and vertical navigation, position validity
//! - [`edit`]: insertion, structural backspace, division and reciprocal
//! - [`selection`]: selection ranges and smart expansion
//! - [`EditHistory`]: snapshot undo/redo
//! - [`EditorState`]: the owned (tokens, cursor, selection) triple with its
//!   structure registry, exposing every operation the host issues
//!
//! # Example
//!
//! ```
//! use formula_editor::editable::EditorState;
//! use formula_editor::model::KeyDescription;
//!
//! let mut editor = EditorState::new();
//! editor.insert(&KeyDescription::classified("1"));
//! editor.insert(&KeyDescription::classified("/"));
//! editor.insert(&KeyDescription::classified("3"));
//!
//! // \frac { 1 } { 3 }
//! assert_eq!(editor.tokens.len(), 7);
//! ```

pub mod cursor;
pub mod edit;
mod history;
pub mod selection;
mod state;

pub use cursor::{is_valid_position, move_horizontal, move_vertical, MAX_SKIP_RETRIES};
pub use edit::{
    backspace, delete_range, divide_block, insert, insert_literal, preceding_block, reciprocal,
    reciprocal_block, DIVISION_SYMBOL, RECIPROCAL_SYMBOL,
};
pub use history::{EditHistory, EditorSnapshot, DEFAULT_HISTORY_LIMIT};
pub use selection::{expand_selection, Selection};
pub use state::EditorState;
