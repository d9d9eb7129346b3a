//! Selection ranges and smart expansion

use std::ops::Range;

use crate::model::scan::{innermost_scope, is_balanced, matching_close};
use crate::model::{Token, TokenKind};

/// Half-open range `[start, end)` over the token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when the selection covers a sequence of `len` tokens entirely
    pub fn spans_all(&self, len: usize) -> bool {
        self.start == 0 && self.end == len
    }

    /// True when the selected tokens can be removed without unbalancing
    pub fn is_balanced_in(&self, tokens: &[Token]) -> bool {
        tokens
            .get(self.range())
            .is_some_and(|selected| is_balanced(selected))
    }
}

/// Next selection when the user asks to expand
///
/// Grows from the innermost scope outward, then to the whole sequence, then
/// back to no selection.
pub fn expand_selection(
    tokens: &[Token],
    cursor: usize,
    current: Option<Selection>,
) -> Option<Selection> {
    let len = tokens.len();
    let cursor = cursor.min(len);

    let Some(selection) = current else {
        let scope = innermost_scope(tokens, cursor);
        if !scope.is_empty() {
            return Some(Selection::new(scope.start, scope.end));
        }
        if cursor > 0 {
            return Some(Selection::new(cursor - 1, cursor));
        }
        return (len > 0).then(|| Selection::new(0, 1));
    };

    if selection.spans_all(len) {
        return None;
    }

    if let Some(wrapped) = command_wrapper(tokens, selection) {
        return Some(wrapped);
    }

    let mut probe = selection.start;
    loop {
        let scope = innermost_scope(tokens, probe);
        let contains = scope.start <= selection.start && selection.end <= scope.end;
        let same = scope.start == selection.start && scope.end == selection.end;
        if contains && !same {
            return Some(Selection::new(scope.start, scope.end));
        }
        if scope.start == 0 {
            // Already at top level
            return Some(Selection::new(0, len));
        }
        // Step outside this scope's opening bracket
        probe = scope.start - 1;
    }
}

/// `\cmd { selection }` with the selection as the command's sole argument
fn command_wrapper(tokens: &[Token], selection: Selection) -> Option<Selection> {
    let Selection { start, end } = selection;
    let open = start.checked_sub(1)?;
    let head = open.checked_sub(1)?;
    if !tokens.get(open)?.is("{") || matching_close(tokens, open)? != end {
        return None;
    }
    if tokens[head].kind != TokenKind::Command {
        return None;
    }
    if tokens.get(end + 1).is_some_and(|next| next.is("{")) {
        return None;
    }
    Some(Selection::new(head, end + 1))
}
