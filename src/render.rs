//! Token stream → colorized markup
//!
//! Structural symbols (brackets, markers, `^`, `_`, commands) are emitted
//! bare since annotating them would break the markup's own syntax. Every
//! other token is wrapped in `\textcolor{#RRGGBB}{…}` unless its resolved
//! color is one of the palette's plain colors.

use crate::model::{Token, TokenKind};
use crate::theme::{Color, Palette};

/// Glyph drawn at the cursor position
pub const CURSOR_GLYPH: &str = "|";

/// Markup for the formula with an embedded cursor marker
pub fn render(tokens: &[Token], cursor: usize, palette: &Palette) -> String {
    let marker = annotate(palette.cursor, CURSOR_GLYPH);
    let mut out = MarkupWriter::default();

    for (i, token) in tokens.iter().enumerate() {
        if i == cursor {
            out.push(&marker);
        }
        if is_structural(token) {
            out.push(&token.value);
            continue;
        }
        let color = token.color.unwrap_or_else(|| palette.color_for(token.kind));
        if palette.is_plain(color) {
            out.push(&token.value);
        } else {
            out.push(&annotate(color, &token.value));
        }
    }
    if cursor >= tokens.len() {
        out.push(&marker);
    }

    out.finish()
}

/// Plain concatenated markup: no cursor, no colors
pub fn source_markup(tokens: &[Token]) -> String {
    let mut out = MarkupWriter::default();
    for token in tokens {
        out.push(&token.value);
    }
    out.finish()
}

fn annotate(color: Color, value: &str) -> String {
    format!("\\textcolor{{{}}}{{{}}}", color.to_hex(), value)
}

fn is_structural(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Bracket | TokenKind::StructureMarker | TokenKind::Command
    ) || token.is_open_bracket()
        || token.is_close_bracket()
        || token.is("^")
        || token.is("_")
}

/// Appends markup pieces, keeping `\pi` and a following `x` from fusing into `\pix`
#[derive(Default)]
struct MarkupWriter {
    out: String,
    after_command_word: bool,
}

impl MarkupWriter {
    fn push(&mut self, piece: &str) {
        if self.after_command_word && piece.starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.out.push(' ');
        }
        self.out.push_str(piece);
        self.after_command_word = is_command_word(piece);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// `\` followed by letters only
fn is_command_word(piece: &str) -> bool {
    piece
        .strip_prefix('\\')
        .is_some_and(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
}
