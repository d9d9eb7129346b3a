//! Key descriptions: what a key press inserts
//!
//! A key is either a flat insertion (one token of a given category) or an
//! ordered template of items, at most one of which is flagged as the cursor
//! stop. The edit engine consumes these; it never owns them.

use serde::{Deserialize, Serialize};

use super::token::{Token, TokenKind};
use crate::theme::Color;

/// One item of an insertion template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub value: String,
    pub kind: TokenKind,
    /// Cursor lands right after this item once the template is inserted
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cursor_stop: bool,
}

impl TemplateItem {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind,
            cursor_stop: false,
        }
    }

    /// Mark this item as the cursor stop
    pub fn stop(mut self) -> Self {
        self.cursor_stop = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Insertion {
    Flat {
        kind: TokenKind,
        value: String,
        color: Option<Color>,
    },
    Template(Vec<TemplateItem>),
}

/// A key's symbol plus what it inserts
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescription {
    pub symbol: String,
    pub insertion: Insertion,
}

impl KeyDescription {
    /// Single token whose value is also the key symbol
    pub fn flat(kind: TokenKind, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            symbol: value.clone(),
            insertion: Insertion::Flat {
                kind,
                value,
                color: None,
            },
        }
    }

    /// Flat key for a bare symbol, guessing the category
    pub fn classified(value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = TokenKind::classify(&value);
        Self::flat(kind, value)
    }

    pub fn template(symbol: impl Into<String>, items: Vec<TemplateItem>) -> Self {
        Self {
            symbol: symbol.into(),
            insertion: Insertion::Template(items),
        }
    }

    /// Override the inserted color (flat keys only)
    pub fn with_color(mut self, new_color: Color) -> Self {
        if let Insertion::Flat { ref mut color, .. } = self.insertion {
            *color = Some(new_color);
        }
        self
    }

    /// Build fresh tokens for this key
    ///
    /// Returns the tokens plus the cursor offset within the inserted run:
    /// right after the flagged item, or the run length when nothing is flagged.
    pub fn materialize(&self) -> (Vec<Token>, usize) {
        match &self.insertion {
            Insertion::Flat { kind, value, color } => {
                let mut token = Token::new(*kind, value.clone());
                token.color = *color;
                (vec![token], 1)
            }
            Insertion::Template(items) => {
                let tokens: Vec<Token> = items
                    .iter()
                    .map(|item| Token::new(item.kind, item.value.clone()))
                    .collect();
                let stop = items
                    .iter()
                    .position(|item| item.cursor_stop)
                    .map(|i| i + 1)
                    .unwrap_or(tokens.len());
                (tokens, stop)
            }
        }
    }

    /// True if the key inserts a single token with this value
    pub fn is_flat(&self, value: &str) -> bool {
        matches!(&self.insertion, Insertion::Flat { value: v, .. } if v == value)
    }
}
