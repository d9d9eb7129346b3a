//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use formula_editor::editable::EditorState;
use formula_editor::keys::KeyLayout;
use formula_editor::model::token::values;
use formula_editor::model::{KeyDescription, Token, TokenKind};

/// Build a sequence from space-separated symbols
///
/// `^` or `_` right after a closing brace is a limit marker
/// (`\int _ { a } ^ { b }`); a `^` anywhere else is the power operator.
pub fn seq(src: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for symbol in src.split_whitespace() {
        let after_block = tokens.last().is_some_and(|t| t.is("}"));
        let token = if symbol == "^" && after_block {
            Token::marker("^")
        } else {
            Token::classified(symbol)
        };
        tokens.push(token);
    }
    tokens
}

/// Editor holding `src` with the cursor at `cursor`
pub fn editor_with(src: &str, cursor: usize) -> EditorState {
    let mut editor = EditorState::new();
    editor.set_tokens(seq(src), cursor);
    editor
}

/// Symbols of the editor's sequence joined by spaces
pub fn text(editor: &EditorState) -> String {
    values(&editor.tokens).join(" ")
}

/// Key from the embedded layout, or a classified flat key
pub fn key(symbol: &str) -> KeyDescription {
    KeyLayout::default()
        .find(symbol)
        .and_then(|k| k.description.clone())
        .unwrap_or_else(|| KeyDescription::classified(symbol))
}

/// Press each insert key in turn
pub fn type_keys(editor: &mut EditorState, symbols: &[&str]) {
    for symbol in symbols {
        editor.insert(&key(symbol));
    }
}

pub fn number(value: &str) -> KeyDescription {
    KeyDescription::flat(TokenKind::Number, value)
}
