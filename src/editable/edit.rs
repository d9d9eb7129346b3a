//! Edit engine: insertion, structural backspace, division and reciprocal
//!
//! Every function here takes the sequence by `&mut Vec<Token>` plus the
//! cursor, and returns the new cursor. A balanced sequence stays balanced.

use std::ops::Range;

use crate::model::scan::{
    enclosing_braces, is_balanced, matching_close, matching_open, scan_structure_end,
};
use crate::model::token::closing_for;
use crate::model::{Insertion, KeyDescription, Token, TokenKind};
use crate::structure::{FractionLayout, StructureKind, StructureRegistry};

/// Key symbol that turns the preceding block into a numerator
pub const DIVISION_SYMBOL: &str = "/";
/// Key symbol that inverts the preceding block
pub const RECIPROCAL_SYMBOL: &str = "reciprocal";

/// Insert what `key` describes at `cursor`
pub fn insert(
    tokens: &mut Vec<Token>,
    cursor: usize,
    key: &KeyDescription,
    registry: &StructureRegistry,
) -> usize {
    let cursor = cursor.min(tokens.len());
    match key.symbol.as_str() {
        DIVISION_SYMBOL => {
            let block = preceding_block(tokens, cursor);
            divide_block(tokens, block)
        }
        RECIPROCAL_SYMBOL => reciprocal(tokens, cursor, registry),
        _ => insert_literal(tokens, cursor, key),
    }
}

/// Splice the key's tokens in at `cursor`
///
/// A flat opening bracket brings its closing partner along; a flat closing
/// bracket only steps over an identical token already to the right.
pub fn insert_literal(tokens: &mut Vec<Token>, cursor: usize, key: &KeyDescription) -> usize {
    let cursor = cursor.min(tokens.len());
    let (inserted, stop) = key.materialize();

    if let Insertion::Flat { value, .. } = &key.insertion {
        if let Some(close) = closing_for(value) {
            tokens.splice(
                cursor..cursor,
                inserted.into_iter().chain([Token::bracket(close)]),
            );
            return cursor + 1;
        }
        if inserted.first().is_some_and(Token::is_close_bracket) {
            let steps_over = tokens.get(cursor).is_some_and(|next| next.is(value));
            return if steps_over { cursor + 1 } else { cursor };
        }
    }

    if !is_balanced(&inserted) {
        tracing::warn!("Refusing unbalanced template for key '{}'", key.symbol);
        return cursor;
    }

    tokens.splice(cursor..cursor, inserted);
    cursor + stop
}

/// Logical unit immediately left of `cursor`
///
/// A closing bracket extends back to its opening bracket, across sibling
/// argument blocks of a command, plus the head (`\sin(x)`, `\frac{a}{b}`,
/// `x^{2}`). A number extends over every adjacent number. Openers, markers
/// and infix operators yield an empty range at the cursor.
pub fn preceding_block(tokens: &[Token], cursor: usize) -> Range<usize> {
    let cursor = cursor.min(tokens.len());
    let Some(last) = cursor.checked_sub(1) else {
        return cursor..cursor;
    };
    let token = &tokens[last];

    if token.is_close_bracket() {
        let Some(open) = matching_open(tokens, last) else {
            return cursor..cursor;
        };
        let start = extend_to_head(tokens, open);
        return start..cursor;
    }

    if token.kind == TokenKind::Number {
        let mut start = last;
        while start > 0 && tokens[start - 1].kind == TokenKind::Number {
            start -= 1;
        }
        return start..cursor;
    }

    if token.is_open_bracket() || token.is_marker() || token.kind == TokenKind::Operator {
        return cursor..cursor;
    }

    last..cursor
}

/// Walk left from a block's opening bracket to the start of its unit
fn extend_to_head(tokens: &[Token], open: usize) -> usize {
    // Sibling blocks count only when they lead to a command
    let mut probe = open;
    while let Some(prev) = probe.checked_sub(1) {
        let token = &tokens[prev];
        if token.is_marker() {
            probe = prev;
        } else if token.is("}") || token.is("]") {
            match matching_open(tokens, prev) {
                Some(sibling) => probe = sibling,
                None => break,
            }
        } else {
            break;
        }
    }
    let leads_to_command = |i: usize| {
        i.checked_sub(1)
            .is_some_and(|head| tokens[head].kind == TokenKind::Command)
    };
    let start = if probe != open && leads_to_command(probe) {
        probe
    } else {
        open
    };

    let Some(head) = start.checked_sub(1) else {
        return start;
    };
    let head_token = &tokens[head];
    if head_token.kind == TokenKind::Command {
        return head;
    }
    if head_token.kind == TokenKind::Operator && head_token.is("^") {
        // x^{2}: the base belongs to the unit
        let base = preceding_block(tokens, head);
        return base.start;
    }
    start
}

/// Rewrite `block` as the numerator of a new fraction
///
/// The cursor lands in the empty denominator, or in the numerator when the
/// block is empty.
pub fn divide_block(tokens: &mut Vec<Token>, block: Range<usize>) -> usize {
    let start = block.start;
    let numerator: Vec<Token> = tokens.drain(block).collect();
    let n = numerator.len();

    let mut fraction = Vec::with_capacity(n + 5);
    fraction.push(Token::command("\\frac"));
    fraction.push(Token::bracket("{"));
    fraction.extend(numerator);
    fraction.push(Token::bracket("}"));
    fraction.push(Token::bracket("{"));
    fraction.push(Token::bracket("}"));
    tokens.splice(start..start, fraction);

    if n == 0 {
        start + 2
    } else {
        start + n + 4
    }
}

/// Reciprocal of the fraction around the cursor, or of the preceding block
pub fn reciprocal(tokens: &mut Vec<Token>, cursor: usize, registry: &StructureRegistry) -> usize {
    let cursor = cursor.min(tokens.len());
    if let Some(layout) = enclosing_fraction(tokens, cursor, registry) {
        return invert_fraction(tokens, layout);
    }

    let block = preceding_block(tokens, cursor);
    reciprocal_block(tokens, block, registry)
}

/// Nearest fraction whose argument contains `cursor`, looking through any
/// structures nested inside it
fn enclosing_fraction(
    tokens: &[Token],
    cursor: usize,
    registry: &StructureRegistry,
) -> Option<FractionLayout> {
    let mut index = cursor;
    while let Some((open, _)) = enclosing_braces(tokens, index) {
        let fraction = registry
            .structure_at(tokens, index)
            .filter(|span| span.kind == StructureKind::Fraction);
        if let Some(span) = fraction {
            return FractionLayout::locate(tokens, span.command_index);
        }
        index = open;
    }
    None
}

/// Invert `block`: a complete fraction is flipped or swapped, anything else
/// is wrapped as `\frac{1}{block}`
pub fn reciprocal_block(
    tokens: &mut Vec<Token>,
    block: Range<usize>,
    registry: &StructureRegistry,
) -> usize {
    let whole_fraction = tokens
        .get(block.start)
        .filter(|_| !block.is_empty())
        .and_then(|head| registry.kind_of(head))
        .filter(|kind| *kind == StructureKind::Fraction)
        .filter(|_| scan_structure_end(tokens, block.start) + 1 == block.end)
        .and_then(|_| FractionLayout::locate(tokens, block.start));
    if let Some(layout) = whole_fraction {
        return invert_fraction(tokens, layout);
    }

    let start = block.start;
    let denominator: Vec<Token> = tokens.drain(block).collect();
    let n = denominator.len();

    let mut fraction = Vec::with_capacity(n + 6);
    fraction.push(Token::command("\\frac"));
    fraction.push(Token::bracket("{"));
    fraction.push(Token::number("1"));
    fraction.push(Token::bracket("}"));
    fraction.push(Token::bracket("{"));
    fraction.extend(denominator);
    fraction.push(Token::bracket("}"));
    tokens.splice(start..start, fraction);

    if n == 0 {
        start + 5
    } else {
        start + n + 6
    }
}

/// `\frac{1}{b}` becomes `b`, `\frac{a}{b}` becomes `\frac{b}{a}`
///
/// The cursor lands right after the result.
fn invert_fraction(tokens: &mut Vec<Token>, layout: FractionLayout) -> usize {
    let numerator = layout.numerator(tokens);
    let denominator = layout.denominator(tokens);
    let is_unit = numerator.len() == 1 && numerator[0].is("1");

    let replacement = if is_unit {
        denominator
    } else {
        let mut swapped = Vec::with_capacity(numerator.len() + denominator.len() + 5);
        swapped.push(Token::command("\\frac"));
        swapped.push(Token::bracket("{"));
        swapped.extend(denominator);
        swapped.push(Token::bracket("}"));
        swapped.push(Token::bracket("{"));
        swapped.extend(numerator);
        swapped.push(Token::bracket("}"));
        swapped
    };

    let start = layout.command_index;
    let n = replacement.len();
    tokens.splice(start..=layout.den_close, replacement);
    start + n
}

/// Structure-aware backspace
pub fn backspace(tokens: &mut Vec<Token>, cursor: usize, registry: &StructureRegistry) -> usize {
    let cursor = cursor.min(tokens.len());
    let Some(left) = cursor.checked_sub(1) else {
        return 0;
    };

    if tokens[left].is_close_bracket() {
        // Enter from the right before consuming anything
        return left;
    }
    if tokens[left].is_open_bracket() {
        return delete_structural(tokens, cursor, registry);
    }

    tokens.remove(left);
    left
}

/// Backspace with the cursor right after an opening bracket
fn delete_structural(tokens: &mut Vec<Token>, cursor: usize, registry: &StructureRegistry) -> usize {
    let open = cursor - 1;

    if tokens[open].is("{") {
        if let Some(span) = registry.structure_at(tokens, cursor) {
            let ctx = span.context(tokens, cursor);
            if let Some(outcome) = span.kind.strategy().on_delete(&ctx) {
                *tokens = outcome.tokens;
                return outcome.cursor.min(tokens.len());
            }
        }
    }

    let Some(head) = open.checked_sub(1) else {
        return remove_pair(tokens, open);
    };
    let head_token = &tokens[head];

    if tokens[open].is("{") && (head_token.is("}") || head_token.is("]")) {
        // Second argument of an unregistered head. Only a root degree is
        // dropped along with its radicand, anything else waits for the
        // earlier argument to go first.
        if head_token.is("]") {
            if let Some(degree_open) = matching_open(tokens, head) {
                let is_root = degree_open
                    .checked_sub(1)
                    .is_some_and(|i| tokens[i].kind == TokenKind::Command);
                if is_root {
                    if let Some(close) = matching_close(tokens, open) {
                        let command = degree_open - 1;
                        let content: Vec<Token> = tokens[open + 1..close].to_vec();
                        tokens.splice(command..=close, content);
                        return command;
                    }
                }
            }
        }
        return cursor;
    }

    if tokens[open].is("[") && head_token.kind == TokenKind::Command {
        if let Some(close) = matching_close(tokens, open) {
            if tokens.get(close + 1).is_some_and(|t| t.is("{")) {
                // \sqrt[3]{8}: the degree moves out in front of a plain root
                let degree: Vec<Token> = tokens[open + 1..close].to_vec();
                let n = degree.len();
                let command = tokens[head].clone();
                tokens.splice(head..=close, degree.into_iter().chain([command]));
                return head + n;
            }
        }
    }

    let wraps = head_token.kind == TokenKind::Command
        || head_token.is_marker()
        || (head_token.kind == TokenKind::Operator && tokens[open].is("{"));
    if wraps {
        if let Some(close) = matching_close(tokens, open) {
            let content: Vec<Token> = tokens[open + 1..close].to_vec();
            tokens.splice(head..=close, content);
            return head;
        }
    }

    remove_pair(tokens, open)
}

/// Drop the bracket at `open` and its partner, keeping what is between
fn remove_pair(tokens: &mut Vec<Token>, open: usize) -> usize {
    if let Some(close) = matching_close(tokens, open) {
        tokens.remove(close);
    }
    tokens.remove(open);
    open
}

/// Remove `range` when doing so keeps the sequence balanced
pub fn delete_range(tokens: &mut Vec<Token>, range: Range<usize>) -> Option<usize> {
    if range.end > tokens.len() || range.start > range.end {
        return None;
    }
    if !is_balanced(&tokens[range.clone()]) {
        return None;
    }
    let start = range.start;
    tokens.drain(range);
    Some(start)
}
