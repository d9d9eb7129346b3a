//! Snapshot-based undo/redo

use super::selection::Selection;
use crate::model::Token;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Deep copy of the editor triple
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    pub tokens: Vec<Token>,
    pub cursor: usize,
    pub selection: Option<Selection>,
}

/// Edit history with undo/redo stacks
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditorSnapshot>,
    redo_stack: Vec<EditorSnapshot>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the state before an edit (clears the redo stack)
    pub fn push(&mut self, snapshot: EditorSnapshot) {
        self.redo_stack.clear();
        self.undo_stack.push(snapshot);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Trade `current` for the most recent recorded state
    pub fn undo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Trade `current` for the most recently undone state
    pub fn redo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
