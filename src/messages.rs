//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::analysis::AnalysisReport;
use crate::error::ServiceError;
use crate::structure::{Horizontal, Vertical};

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn horizontal(self) -> Option<Horizontal> {
        match self {
            Direction::Left => Some(Horizontal::Left),
            Direction::Right => Some(Horizontal::Right),
            Direction::Up | Direction::Down => None,
        }
    }

    pub fn vertical(self) -> Option<Vertical> {
        match self {
            Direction::Up => Some(Vertical::Up),
            Direction::Down => Some(Vertical::Down),
            Direction::Left | Direction::Right => None,
        }
    }
}

/// Editing and navigation requests from the keypad
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// Insert the key with this symbol (looked up in the key layout)
    Insert(String),
    Backspace,
    Move(Direction),
    ExpandSelection,
    Clear,
    Undo,
    Redo,
    /// Evaluate now, or send off for analysis when not translatable
    Execute,
}

/// Results coming back from the worker threads
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationMsg {
    Completed {
        revision: u64,
        result: Result<String, ServiceError>,
    },
    AnalysisCompleted {
        revision: u64,
        result: Result<AnalysisReport, ServiceError>,
    },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Editor(EditorMsg),
    Evaluation(EvaluationMsg),
}
