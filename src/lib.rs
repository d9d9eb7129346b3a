//! Formula Editor - structural formula editing over a flat token sequence
//!
//! This crate provides the editing core (tokens, structures, cursor
//! navigation, structural deletion, selection), the renderer and expression
//! translator, and an Elm-style host layer around them.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod evaluation;
pub mod keys;
pub mod messages;
pub mod model;
pub mod render;
pub mod runtime;
pub mod structure;
pub mod theme;
pub mod tracing;
pub mod translate;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use editable::EditorState;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Palette;
