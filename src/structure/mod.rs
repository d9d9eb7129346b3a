//! Structure strategies
//!
//! A structure is a derived view over the token sequence: a head token
//! (`\frac`, `^`, `\int`, `\log`, ...) followed by adjacent argument blocks.
//! Each [`StructureKind`] has a strategy implementing the navigation and
//! deletion rules for its argument layout.
//!
//! The [`StructureRegistry`] maps head symbols to kinds. It is a plain value
//! owned by the editor, so different editors may register different heads.

mod fraction;
mod integral;
mod log;
mod power;

use std::collections::HashMap;

use crate::model::scan::{enclosing_braces, matching_open, scan_structure_end};
use crate::model::{Token, TokenKind};

pub use fraction::{FractionLayout, FractionStrategy};
pub use integral::IntegralStrategy;
pub use log::LogStrategy;
pub use power::PowerStrategy;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Vertical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Side of a structure the cursor is entering from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Closed set of structure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    /// `\frac {num} {den}`
    Fraction,
    /// `^ {exp}`
    Power,
    /// `\int _ {lower} ^ {upper}` (also used for `\sum`, `\prod`)
    Integral,
    /// `\log _ {base}`
    Logarithm,
}

impl StructureKind {
    pub fn strategy(self) -> &'static dyn StructureStrategy {
        match self {
            StructureKind::Fraction => &FractionStrategy,
            StructureKind::Power => &PowerStrategy,
            StructureKind::Integral => &IntegralStrategy,
            StructureKind::Logarithm => &LogStrategy,
        }
    }
}

/// Boundaries of one structure occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureSpan {
    pub kind: StructureKind,
    pub command_index: usize,
    pub block_start: usize,
    /// Index of the last argument's closing bracket
    pub block_end: usize,
}

impl StructureSpan {
    pub fn context<'a>(&self, tokens: &'a [Token], cursor: usize) -> StructureContext<'a> {
        StructureContext {
            tokens,
            cursor,
            command_index: self.command_index,
            block_start: self.block_start,
            block_end: self.block_end,
        }
    }
}

/// Everything a strategy may look at
#[derive(Debug, Clone, Copy)]
pub struct StructureContext<'a> {
    pub tokens: &'a [Token],
    pub cursor: usize,
    pub command_index: usize,
    pub block_start: usize,
    pub block_end: usize,
}

/// Result of a structure-specific deletion
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub tokens: Vec<Token>,
    pub cursor: usize,
}

impl DeleteOutcome {
    /// Leave the sequence alone, only place the cursor
    pub fn unchanged(ctx: &StructureContext, cursor: usize) -> Self {
        Self {
            tokens: ctx.tokens.to_vec(),
            cursor,
        }
    }

    /// Replace `range` of the sequence with `replacement`
    pub fn splice(
        ctx: &StructureContext,
        range: std::ops::RangeInclusive<usize>,
        replacement: Vec<Token>,
        cursor: usize,
    ) -> Self {
        let mut tokens = ctx.tokens.to_vec();
        tokens.splice(range, replacement);
        Self { tokens, cursor }
    }
}

/// Navigation and deletion rules for one structure kind
///
/// `None` from a hook means "no special behavior here": the caller falls
/// back to its generic rule.
pub trait StructureStrategy: Sync {
    fn on_move_up(&self, ctx: &StructureContext) -> Option<usize>;

    fn on_move_down(&self, ctx: &StructureContext) -> Option<usize>;

    /// Backspace with the cursor right after one of this structure's opening brackets
    fn on_delete(&self, ctx: &StructureContext) -> Option<DeleteOutcome>;

    /// Where a cursor diving in from `side` lands
    fn entrance_index(&self, ctx: &StructureContext, side: Side) -> usize;

    /// Where a cursor at an argument edge lands when moving further in `direction`
    fn exit_index(&self, ctx: &StructureContext, direction: Horizontal) -> Option<usize>;
}

/// Content slice between two brackets, as fresh copies
pub(crate) fn content(tokens: &[Token], open: usize, close: usize) -> Vec<Token> {
    tokens
        .get(open + 1..close)
        .map(|slice| slice.to_vec())
        .unwrap_or_default()
}

/// First `{` after `from`, skipping StructureMarkers
pub(crate) fn next_block_open(tokens: &[Token], from: usize) -> Option<usize> {
    let mut i = from;
    while let Some(token) = tokens.get(i) {
        if token.is("{") {
            return Some(i);
        }
        if !token.is_marker() {
            return None;
        }
        i += 1;
    }
    None
}

/// Head symbol → structure kind table
#[derive(Debug, Clone)]
pub struct StructureRegistry {
    heads: HashMap<String, StructureKind>,
}

impl Default for StructureRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("\\frac", StructureKind::Fraction);
        registry.register("^", StructureKind::Power);
        registry.register("\\int", StructureKind::Integral);
        registry.register("\\sum", StructureKind::Integral);
        registry.register("\\prod", StructureKind::Integral);
        registry.register("\\log", StructureKind::Logarithm);
        registry
    }
}

impl StructureRegistry {
    /// Registry with no heads at all
    pub fn empty() -> Self {
        Self {
            heads: HashMap::new(),
        }
    }

    pub fn register(&mut self, head: impl Into<String>, kind: StructureKind) {
        self.heads.insert(head.into(), kind);
    }

    pub fn unregister(&mut self, head: &str) -> Option<StructureKind> {
        self.heads.remove(head)
    }

    /// Kind headed by this token, if any
    ///
    /// StructureMarkers never head a structure, even when their symbol is
    /// registered (a limit `^` is not a power).
    pub fn kind_of(&self, token: &Token) -> Option<StructureKind> {
        if token.kind == TokenKind::StructureMarker {
            return None;
        }
        self.heads.get(&token.value).copied()
    }

    /// Structure headed at `index` with at least one argument block
    pub fn structure_starting_at(&self, tokens: &[Token], index: usize) -> Option<StructureSpan> {
        let kind = self.kind_of(tokens.get(index)?)?;
        let block_end = scan_structure_end(tokens, index);
        if block_end == index {
            return None;
        }
        Some(StructureSpan {
            kind,
            command_index: index,
            block_start: index,
            block_end,
        })
    }

    /// Innermost registered structure whose argument encloses `index`
    pub fn structure_at(&self, tokens: &[Token], index: usize) -> Option<StructureSpan> {
        let (open, _) = enclosing_braces(tokens, index)?;
        let head = head_before(tokens, open)?;
        self.structure_starting_at(tokens, head)
    }

    /// Registered structure ending right before `cursor`
    pub fn structure_before(&self, tokens: &[Token], cursor: usize) -> Option<StructureSpan> {
        let last = cursor.checked_sub(1)?;
        if !tokens.get(last)?.is("}") {
            return None;
        }
        let open = matching_open(tokens, last)?;
        let head = head_before(tokens, open)?;
        self.structure_starting_at(tokens, head)
            .filter(|span| span.block_end == last)
    }
}

/// Walk left from an argument's opening brace over sibling blocks and markers
fn head_before(tokens: &[Token], open: usize) -> Option<usize> {
    let mut i = open.checked_sub(1)?;
    loop {
        let token = &tokens[i];
        if token.is_marker() {
            i = i.checked_sub(1)?;
        } else if token.is("}") {
            i = matching_open(tokens, i)?.checked_sub(1)?;
        } else {
            return Some(i);
        }
    }
}
