//! Bracket and scope scanning over a token sequence
//!
//! These pure functions stand in for parent/child pointers: every structural
//! question (where does this argument end, which block encloses the cursor)
//! is answered by balance-counting brackets. Matching is kind-specific, so
//! `{}`, `[]` and `()` never cross-match.
//!
//! Unclosed brackets are normal while the user is mid-edit. Scans that need a
//! boundary degrade to "end of sequence" instead of failing.

use super::token::{closing_for, opening_for, Token, TokenKind};

/// Content bounds of a scope, exclusive of its brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub start: usize,
    pub end: usize,
}

impl Scope {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Index of the bracket closing the one at `open`
pub fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let open_value = tokens.get(open)?.value.as_str();
    let close_value = closing_for(open_value)?;

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        if token.value == open_value {
            depth += 1;
        } else if token.value == close_value {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Index of the bracket opening the one at `close`
pub fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let close_value = tokens.get(close)?.value.as_str();
    let open_value = opening_for(close_value)?;

    let mut depth = 0usize;
    for i in (0..=close).rev() {
        let token = &tokens[i];
        if token.value == close_value {
            depth += 1;
        } else if token.value == open_value {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Index of the last token belonging to the structure headed at `command_index`
///
/// Consumes adjacent `{…}` argument blocks, skipping the StructureMarkers that
/// separate them (`\int _ {a} ^ {b}`). Returns `command_index` itself when no
/// argument block follows the head.
pub fn scan_structure_end(tokens: &[Token], command_index: usize) -> usize {
    let mut last_end = command_index;
    let mut i = command_index + 1;

    while let Some(token) = tokens.get(i) {
        if token.kind == TokenKind::StructureMarker {
            i += 1;
            continue;
        }
        if !token.is("{") {
            break;
        }
        match matching_close(tokens, i) {
            Some(close) => {
                last_end = close;
                i = close + 1;
            }
            None => return tokens.len().saturating_sub(1),
        }
    }
    last_end
}

/// Brackets of the innermost `{…}` enclosing `index`
///
/// Returns `(open, close)`. When the enclosing brace is still unclosed,
/// `close` is `tokens.len()`.
pub fn enclosing_braces(tokens: &[Token], index: usize) -> Option<(usize, usize)> {
    let index = index.min(tokens.len());
    let mut depth = 0usize;

    for i in (0..index).rev() {
        let token = &tokens[i];
        if token.is("}") {
            depth += 1;
        } else if token.is("{") {
            if depth == 0 {
                let close = matching_close(tokens, i).unwrap_or(tokens.len());
                return Some((i, close));
            }
            depth -= 1;
        }
    }
    None
}

/// Content bounds of the innermost `{…}` around `index`, or the whole sequence
pub fn innermost_scope(tokens: &[Token], index: usize) -> Scope {
    match enclosing_braces(tokens, index) {
        Some((open, close)) => Scope::new(open + 1, close),
        None => Scope::new(0, tokens.len()),
    }
}

/// Every opening bracket has a matching close and vice versa
pub fn is_balanced(tokens: &[Token]) -> bool {
    let mut stack: Vec<&'static str> = Vec::new();
    for token in tokens {
        if let Some(close) = closing_for(&token.value) {
            stack.push(close);
        } else if opening_for(&token.value).is_some() && stack.pop() != Some(token.value.as_str())
        {
            return false;
        }
    }
    stack.is_empty()
}
