//! EditorState - the token sequence with its cursor, selection, registry and history

use super::cursor::{move_horizontal, move_vertical};
use super::edit::{self, DIVISION_SYMBOL, RECIPROCAL_SYMBOL};
use super::history::{EditHistory, EditorSnapshot};
use super::selection::{expand_selection, Selection};
use crate::model::{KeyDescription, Token};
use crate::structure::{Horizontal, StructureRegistry, Vertical};

/// One formula being edited
///
/// Owns its sequence exclusively. Every public operation leaves the sequence
/// balanced and the cursor within `[0, len]`.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub tokens: Vec<Token>,
    pub cursor: usize,
    pub selection: Option<Selection>,
    /// Structure heads this editor recognizes
    pub registry: StructureRegistry,
    history: EditHistory,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_registry(StructureRegistry::default())
    }

    pub fn with_registry(registry: StructureRegistry) -> Self {
        Self {
            tokens: Vec::new(),
            cursor: 0,
            selection: None,
            registry,
            history: EditHistory::new(),
        }
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: EditHistory::with_max_size(limit),
            ..Self::new()
        }
    }

    /// Replace the whole sequence, e.g. when loading a saved formula
    ///
    /// The cursor is clamped; history is kept so the load can be undone.
    pub fn set_tokens(&mut self, tokens: Vec<Token>, cursor: usize) {
        self.record(|state| {
            state.cursor = cursor.min(tokens.len());
            state.tokens = tokens;
            state.selection = None;
        });
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some_and(|s| !s.is_empty())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            tokens: self.tokens.clone(),
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: EditorSnapshot) {
        self.tokens = snapshot.tokens;
        self.cursor = snapshot.cursor.min(self.tokens.len());
        self.selection = snapshot.selection;
    }

    /// Run `edit`, recording history only if the sequence changed
    ///
    /// Returns whether the sequence changed.
    fn record(&mut self, edit: impl FnOnce(&mut Self)) -> bool {
        let before = self.snapshot();
        edit(self);
        let changed = self.tokens != before.tokens;
        if changed {
            self.history.push(before);
        }
        changed
    }

    /// Selection usable as an edit block
    fn balanced_selection(&self) -> Option<Selection> {
        self.selection
            .filter(|s| !s.is_empty() && s.is_balanced_in(&self.tokens))
    }

    // === Editing ===

    /// Insert a key, replacing or transforming the selection when there is one
    pub fn insert(&mut self, key: &KeyDescription) -> bool {
        let selection = self.balanced_selection();
        let changed = self.record(|state| {
            let registry = &state.registry;
            let tokens = &mut state.tokens;
            state.cursor = match (key.symbol.as_str(), selection) {
                (DIVISION_SYMBOL, Some(s)) => edit::divide_block(tokens, s.range()),
                (RECIPROCAL_SYMBOL, Some(s)) => edit::reciprocal_block(tokens, s.range(), registry),
                (DIVISION_SYMBOL | RECIPROCAL_SYMBOL, None) => {
                    edit::insert(tokens, state.cursor, key, registry)
                }
                (_, Some(s)) => {
                    let at = edit::delete_range(tokens, s.range()).unwrap_or(state.cursor);
                    edit::insert_literal(tokens, at, key)
                }
                (_, None) => edit::insert_literal(tokens, state.cursor, key),
            };
        });
        self.selection = None;
        changed
    }

    /// Delete a balanced selection, or structure-aware backspace
    pub fn backspace(&mut self) -> bool {
        if let Some(selection) = self.selection.take().filter(|s| !s.is_empty()) {
            if !selection.is_balanced_in(&self.tokens) {
                // Unbalanced selections are only cleared
                return false;
            }
            return self.record(|state| {
                if let Some(at) = edit::delete_range(&mut state.tokens, selection.range()) {
                    state.cursor = at;
                }
            });
        }

        self.record(|state| {
            state.cursor = edit::backspace(&mut state.tokens, state.cursor, &state.registry);
        })
    }

    /// Empty the formula
    pub fn clear(&mut self) -> bool {
        self.record(|state| {
            state.tokens.clear();
            state.cursor = 0;
            state.selection = None;
        })
    }

    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    // === Navigation ===

    pub fn move_horizontal(&mut self, direction: Horizontal) {
        self.selection = None;
        self.cursor = move_horizontal(&self.tokens, self.cursor, direction, &self.registry);
    }

    pub fn move_vertical(&mut self, direction: Vertical) {
        self.selection = None;
        self.cursor = move_vertical(&self.tokens, self.cursor, direction, &self.registry);
    }

    pub fn expand_selection(&mut self) {
        self.selection = expand_selection(&self.tokens, self.cursor, self.selection);
    }

    /// Check editor invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        debug_assert!(
            crate::model::scan::is_balanced(&self.tokens),
            "Unbalanced sequence: {:?}",
            crate::model::token::values(&self.tokens)
        );
        debug_assert!(
            self.cursor <= self.tokens.len(),
            "Cursor {} beyond sequence length {}",
            self.cursor,
            self.tokens.len()
        );
        if let Some(selection) = self.selection {
            debug_assert!(
                selection.start <= selection.end && selection.end <= self.tokens.len(),
                "Selection {:?} out of bounds for length {}",
                selection,
                self.tokens.len()
            );
        }
    }

    /// Check editor invariants (no-op in release builds)
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::values;

    fn key(symbol: &str) -> KeyDescription {
        KeyDescription::classified(symbol)
    }

    fn typed(symbols: &[&str]) -> EditorState {
        let mut editor = EditorState::new();
        for symbol in symbols {
            editor.insert(&key(symbol));
        }
        editor
    }

    #[test]
    fn test_typing_and_undo() {
        let mut editor = typed(&["1", "+", "2"]);
        assert_eq!(values(&editor.tokens), vec!["1", "+", "2"]);
        assert_eq!(editor.cursor, 3);

        assert!(editor.undo());
        assert_eq!(values(&editor.tokens), vec!["1", "+"]);
        assert_eq!(editor.cursor, 2);

        assert!(editor.redo());
        assert_eq!(values(&editor.tokens), vec!["1", "+", "2"]);
        editor.assert_invariants();
    }

    #[test]
    fn test_noop_is_not_recorded() {
        let mut editor = EditorState::new();
        assert!(!editor.backspace());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_selection_replaced_by_insert() {
        let mut editor = typed(&["1", "+", "2"]);
        editor.selection = Some(Selection::new(0, 2));
        editor.insert(&key("x"));
        assert_eq!(values(&editor.tokens), vec!["x", "2"]);
        assert_eq!(editor.cursor, 1);
        assert_eq!(editor.selection, None);
    }

    #[test]
    fn test_division_of_selection() {
        let mut editor = typed(&["1", "+", "2"]);
        editor.selection = Some(Selection::new(0, 3));
        editor.insert(&key("/"));
        assert_eq!(
            values(&editor.tokens),
            vec!["\\frac", "{", "1", "+", "2", "}", "{", "}"]
        );
        assert_eq!(editor.cursor, 7);
    }

    #[test]
    fn test_reciprocal_of_selection() {
        let mut editor = typed(&["a", "+", "b"]);
        editor.selection = Some(Selection::new(0, 3));
        editor.insert(&key("reciprocal"));
        assert_eq!(
            values(&editor.tokens),
            vec!["\\frac", "{", "1", "}", "{", "a", "+", "b", "}"]
        );
        assert_eq!(editor.cursor, 9);
    }

    #[test]
    fn test_backspace_unbalanced_selection_only_clears() {
        let mut editor = typed(&["(", "2"]);
        // ( 2 )
        editor.selection = Some(Selection::new(0, 2));
        assert!(!editor.backspace());
        assert_eq!(editor.tokens.len(), 3);
        assert_eq!(editor.selection, None);
    }

    #[test]
    fn test_clear_then_undo() {
        let mut editor = typed(&["7"]);
        assert!(editor.clear());
        assert!(editor.is_empty());
        assert!(editor.undo());
        assert_eq!(values(&editor.tokens), vec!["7"]);
    }

    #[test]
    fn test_history_limit() {
        let mut editor = EditorState::with_history_limit(2);
        for digit in ["1", "2", "3", "4"] {
            editor.insert(&key(digit));
        }
        assert!(editor.undo());
        assert!(editor.undo());
        assert!(!editor.undo());
        assert_eq!(values(&editor.tokens), vec!["1", "2"]);
    }
}
