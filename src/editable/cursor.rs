//! Cursor navigation over the flat token sequence
//!
//! Horizontal movement resolves in priority order: escape from a structure
//! argument edge, dive into an adjacent structure, then a default single step
//! that skips positions splitting a head from its arguments. Vertical
//! movement only has meaning inside or right after a registered structure.

use crate::model::{Token, TokenKind};
use crate::structure::{Horizontal, Side, StructureRegistry, StructureSpan, Vertical};

/// How many invalid positions a single default step may skip over
pub const MAX_SKIP_RETRIES: usize = 10;

/// True if the cursor may rest at `index`
///
/// Both ends of the sequence are always valid. Inside, the cursor must not
/// separate a head (command, marker, `^`, `_`) from its first argument, or
/// one argument block from the next.
pub fn is_valid_position(tokens: &[Token], index: usize) -> bool {
    if index == 0 || index >= tokens.len() {
        return true;
    }

    let prev = &tokens[index - 1];
    let next = &tokens[index];
    let prev_is_separator = prev.is_marker() || prev.is("_") || prev.is("^");

    if prev.kind == TokenKind::Command {
        // \sqrt | {   \sin | (   \sqrt | [   \int | _
        if next.is_open_bracket() || next.is_marker() || next.is("_") || next.is("^") {
            return false;
        }
    }
    if prev_is_separator && next.is("{") {
        return false;
    }
    // } | {   ] | {
    if (prev.is("}") || prev.is("]")) && next.is("{") {
        return false;
    }
    // } | ^ between two limit blocks
    if prev.is("}") && next.is_marker() {
        return false;
    }
    true
}

/// Move one logical step left or right
pub fn move_horizontal(
    tokens: &[Token],
    cursor: usize,
    direction: Horizontal,
    registry: &StructureRegistry,
) -> usize {
    let cursor = cursor.min(tokens.len());

    // Escape
    if let Some(span) = registry.structure_at(tokens, cursor) {
        let ctx = span.context(tokens, cursor);
        if let Some(target) = span.kind.strategy().exit_index(&ctx, direction) {
            return target.min(tokens.len());
        }
    }

    // Dive-in
    let adjacent = match direction {
        Horizontal::Left => registry
            .structure_before(tokens, cursor)
            .map(|span| (span, Side::Right)),
        Horizontal::Right => registry
            .structure_starting_at(tokens, cursor)
            .map(|span| (span, Side::Left)),
    };
    if let Some((span, side)) = adjacent {
        let ctx = span.context(tokens, cursor);
        return span.kind.strategy().entrance_index(&ctx, side).min(tokens.len());
    }

    step(tokens, cursor, direction)
}

/// Single step, skipping invalid positions
fn step(tokens: &[Token], cursor: usize, direction: Horizontal) -> usize {
    let mut candidate = cursor;
    for _ in 0..=MAX_SKIP_RETRIES {
        candidate = match direction {
            Horizontal::Left => candidate.saturating_sub(1),
            Horizontal::Right => (candidate + 1).min(tokens.len()),
        };
        if is_valid_position(tokens, candidate) {
            return candidate;
        }
    }
    cursor
}

/// Jump between sibling arguments of the structure around the cursor
///
/// A structure ending right before the cursor takes precedence over the
/// structure enclosing it; only one of them is asked. When it declines, or
/// outside any structure, the cursor stays put.
pub fn move_vertical(
    tokens: &[Token],
    cursor: usize,
    direction: Vertical,
    registry: &StructureRegistry,
) -> usize {
    let cursor = cursor.min(tokens.len());
    let hook = |span: StructureSpan| {
        let ctx = span.context(tokens, cursor);
        let strategy = span.kind.strategy();
        match direction {
            Vertical::Up => strategy.on_move_up(&ctx),
            Vertical::Down => strategy.on_move_down(&ctx),
        }
    };

    registry
        .structure_before(tokens, cursor)
        .or_else(|| registry.structure_at(tokens, cursor))
        .and_then(hook)
        .map(|target| target.min(tokens.len()))
        .unwrap_or(cursor)
}
