//! Application model - the complete state of the formula editor
//!
//! The token sequence itself and its scanning primitives live in the
//! submodules; `AppModel` bundles the editor with everything the host needs
//! around it.

pub mod key;
pub mod scan;
pub mod token;

pub use key::{Insertion, KeyDescription, TemplateItem};
pub use scan::Scope;
pub use token::{Token, TokenId, TokenKind};

use crate::analysis::AnalysisReport;
use crate::config::EditorConfig;
use crate::editable::EditorState;
use crate::keys::KeyLayout;
use crate::theme::Palette;

/// Outcome of the most recent evaluation or analysis
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EvaluationStatus {
    #[default]
    Idle,
    /// Waiting on a response for this revision
    Pending { revision: u64 },
    /// Formatted numeric result
    Value(String),
    /// The formula cannot be evaluated right now
    NotEvaluable,
    Analysis(AnalysisReport),
    /// User-facing failure message
    Failed(String),
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub editor: EditorState,
    /// Persisted configuration
    pub config: EditorConfig,
    pub palette: Palette,
    pub keys: KeyLayout,
    /// Bumped by every edit that changes the token sequence
    pub revision: u64,
    pub status: EvaluationStatus,
}

impl AppModel {
    pub fn new(config: EditorConfig, palette: Palette, keys: KeyLayout) -> Self {
        let editor = EditorState::with_history_limit(config.history_limit);
        Self {
            editor,
            config,
            palette,
            keys,
            revision: 0,
            status: EvaluationStatus::Idle,
        }
    }

    /// Colorized markup of the current formula
    pub fn render(&self) -> String {
        crate::render::render(&self.editor.tokens, self.editor.cursor, &self.palette)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Palette::default(), KeyLayout::default())
    }
}
