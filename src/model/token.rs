//! Token types for the flat formula sequence
//!
//! A formula is stored as an ordered `Vec<Token>`. Nesting is never stored
//! explicitly; it is recovered on demand by bracket scanning (see [`super::scan`]).

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::theme::Color;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque per-token identity, never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Allocate the next identity
    pub fn next() -> Self {
        TokenId(NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Number,
    Command,
    Bracket,
    Operator,
    Variable,
    Cursor,
    /// Separator between a structure head and an argument block (`_`, limit `^`)
    StructureMarker,
}

/// Commands that behave like infix operators rather than structure heads
const OPERATOR_COMMANDS: &[&str] = &[
    "\\cdot", "\\times", "\\div", "\\pm", "\\le", "\\ge", "\\ne", "\\mod", "\\to",
];

/// Commands that stand for a single symbol
const SYMBOL_COMMANDS: &[&str] = &[
    "\\pi", "\\theta", "\\infty", "\\alpha", "\\beta", "\\gamma", "\\lambda", "\\mu", "\\phi",
];

impl TokenKind {
    /// Best-effort category for a bare symbol
    ///
    /// Used when a symbol has no key description (e.g. typed on the command line).
    /// Raw `^` is classified as an operator (power head); limit markers must be
    /// created explicitly as [`TokenKind::StructureMarker`].
    pub fn classify(value: &str) -> TokenKind {
        match value {
            "{" | "}" | "[" | "]" | "(" | ")" | "|" => TokenKind::Bracket,
            "_" => TokenKind::StructureMarker,
            "+" | "-" | "=" | "^" | "!" | "/" | "*" | "<" | ">" => TokenKind::Operator,
            v if OPERATOR_COMMANDS.contains(&v) => TokenKind::Operator,
            v if SYMBOL_COMMANDS.contains(&v) => TokenKind::Variable,
            v if v.starts_with('\\') => TokenKind::Command,
            v if !v.is_empty() && v.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') => {
                TokenKind::Number
            }
            _ => TokenKind::Variable,
        }
    }
}

/// An atomic formula symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    /// Literal markup of the symbol (`"+"`, `"\\frac"`, `"2"`)
    pub value: String,
    pub kind: TokenKind,
    /// Explicit display color, overriding the palette
    pub color: Option<Color>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            id: TokenId::next(),
            value: value.into(),
            kind,
            color: None,
        }
    }

    /// Create a token, guessing its category from the symbol
    pub fn classified(value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = TokenKind::classify(&value);
        Self::new(kind, value)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, value)
    }

    pub fn command(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Command, value)
    }

    pub fn bracket(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Bracket, value)
    }

    pub fn operator(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Operator, value)
    }

    pub fn variable(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Variable, value)
    }

    pub fn marker(value: impl Into<String>) -> Self {
        Self::new(TokenKind::StructureMarker, value)
    }

    #[inline]
    pub fn is(&self, value: &str) -> bool {
        self.value == value
    }

    #[inline]
    pub fn is_open_bracket(&self) -> bool {
        closing_for(&self.value).is_some()
    }

    #[inline]
    pub fn is_close_bracket(&self) -> bool {
        opening_for(&self.value).is_some()
    }

    /// True for `_` or `^` acting as a structure separator
    #[inline]
    pub fn is_marker(&self) -> bool {
        self.kind == TokenKind::StructureMarker
    }

    /// Same symbol, category and color, with a fresh identity
    pub fn duplicate(&self) -> Self {
        Self {
            id: TokenId::next(),
            value: self.value.clone(),
            kind: self.kind,
            color: self.color,
        }
    }
}

/// Closing counterpart of an opening bracket
pub fn closing_for(open: &str) -> Option<&'static str> {
    match open {
        "{" => Some("}"),
        "[" => Some("]"),
        "(" => Some(")"),
        _ => None,
    }
}

/// Opening counterpart of a closing bracket
pub fn opening_for(close: &str) -> Option<&'static str> {
    match close {
        "}" => Some("{"),
        "]" => Some("["),
        ")" => Some("("),
        _ => None,
    }
}

/// Literal values of a sequence, mostly useful for logging and assertions
pub fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.value.as_str()).collect()
}
