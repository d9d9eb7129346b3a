//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::translate::Scope;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-render the formula
    Redraw,
    /// Hand a translated expression to the evaluator
    Evaluate {
        revision: u64,
        expression: String,
        scope: Scope,
    },
    /// Send source markup to the analysis service
    Analyze { revision: u64, markup: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Results come back as messages that redraw when they land
            Cmd::Evaluate { .. } | Cmd::Analyze { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Revision of the evaluation or analysis this command requests, if any
    pub fn request_revision(&self) -> Option<u64> {
        match self {
            Cmd::Evaluate { revision, .. } | Cmd::Analyze { revision, .. } => Some(*revision),
            Cmd::Batch(cmds) => cmds.iter().find_map(Cmd::request_revision),
            Cmd::None | Cmd::Redraw => None,
        }
    }
}
