//! `\frac {numerator} {denominator}`

use super::{content, DeleteOutcome, Horizontal, Side, StructureContext, StructureStrategy};
use crate::model::scan::matching_close;
use crate::model::Token;

/// Bracket positions of a fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionLayout {
    pub command_index: usize,
    pub num_open: usize,
    pub num_close: usize,
    pub den_open: usize,
    pub den_close: usize,
}

impl FractionLayout {
    /// Locate both arguments of the fraction headed at `command_index`
    pub fn locate(tokens: &[Token], command_index: usize) -> Option<Self> {
        let num_open = command_index + 1;
        if !tokens.get(num_open)?.is("{") {
            return None;
        }
        let num_close = matching_close(tokens, num_open)?;
        let den_open = num_close + 1;
        if !tokens.get(den_open)?.is("{") {
            return None;
        }
        let den_close = matching_close(tokens, den_open)?;
        Some(Self {
            command_index,
            num_open,
            num_close,
            den_open,
            den_close,
        })
    }

    fn in_numerator(&self, cursor: usize) -> bool {
        cursor > self.num_open && cursor <= self.num_close
    }

    fn in_denominator(&self, cursor: usize) -> bool {
        cursor > self.den_open && cursor <= self.den_close
    }

    pub fn numerator(&self, tokens: &[Token]) -> Vec<Token> {
        content(tokens, self.num_open, self.num_close)
    }

    pub fn denominator(&self, tokens: &[Token]) -> Vec<Token> {
        content(tokens, self.den_open, self.den_close)
    }

    pub fn denominator_is_empty(&self) -> bool {
        self.den_close == self.den_open + 1
    }

    /// Replace the fraction with its arguments' contents, in order
    fn collapse(&self, ctx: &StructureContext, cursor: usize) -> DeleteOutcome {
        let mut kept = self.numerator(ctx.tokens);
        kept.extend(self.denominator(ctx.tokens));
        DeleteOutcome::splice(ctx, self.command_index..=self.den_close, kept, cursor)
    }
}

pub struct FractionStrategy;

impl StructureStrategy for FractionStrategy {
    fn on_move_up(&self, ctx: &StructureContext) -> Option<usize> {
        let layout = FractionLayout::locate(ctx.tokens, ctx.command_index)?;
        if ctx.cursor == ctx.block_end + 1 || layout.in_denominator(ctx.cursor) {
            return Some(layout.num_close);
        }
        None
    }

    fn on_move_down(&self, ctx: &StructureContext) -> Option<usize> {
        let layout = FractionLayout::locate(ctx.tokens, ctx.command_index)?;
        if ctx.cursor == ctx.block_end + 1 || layout.in_numerator(ctx.cursor) {
            return Some(layout.den_close);
        }
        None
    }

    fn on_delete(&self, ctx: &StructureContext) -> Option<DeleteOutcome> {
        let layout = FractionLayout::locate(ctx.tokens, ctx.command_index)?;

        if ctx.cursor == layout.den_open + 1 {
            let numerator_len = layout.num_close - layout.num_open - 1;
            return Some(layout.collapse(ctx, layout.command_index + numerator_len));
        }

        if ctx.cursor == layout.num_open + 1 {
            if !layout.denominator_is_empty() {
                return Some(DeleteOutcome::unchanged(ctx, ctx.cursor));
            }
            return Some(layout.collapse(ctx, layout.command_index));
        }

        None
    }

    fn entrance_index(&self, ctx: &StructureContext, side: Side) -> usize {
        match side {
            Side::Left => ctx.command_index + 2,
            Side::Right => ctx.block_end,
        }
    }

    fn exit_index(&self, ctx: &StructureContext, direction: Horizontal) -> Option<usize> {
        let layout = FractionLayout::locate(ctx.tokens, ctx.command_index)?;
        match direction {
            Horizontal::Left => {
                if ctx.cursor == layout.num_open + 1 || ctx.cursor == layout.den_open + 1 {
                    return Some(ctx.command_index);
                }
            }
            Horizontal::Right => {
                if ctx.cursor == layout.num_close || ctx.cursor == layout.den_close {
                    return Some(ctx.block_end + 1);
                }
            }
        }
        None
    }
}
