//! `^ {exponent}`

use super::{content, DeleteOutcome, Horizontal, Side, StructureContext, StructureStrategy};

pub struct PowerStrategy;

impl PowerStrategy {
    fn exponent_open(ctx: &StructureContext) -> usize {
        ctx.command_index + 1
    }

    fn in_exponent(ctx: &StructureContext) -> bool {
        ctx.cursor > Self::exponent_open(ctx) && ctx.cursor <= ctx.block_end
    }
}

impl StructureStrategy for PowerStrategy {
    fn on_move_up(&self, ctx: &StructureContext) -> Option<usize> {
        // From right after `x^{2}` up enters the exponent
        (ctx.cursor == ctx.block_end + 1).then_some(ctx.block_end)
    }

    fn on_move_down(&self, ctx: &StructureContext) -> Option<usize> {
        Self::in_exponent(ctx).then_some(ctx.block_end + 1)
    }

    fn on_delete(&self, ctx: &StructureContext) -> Option<DeleteOutcome> {
        let open = Self::exponent_open(ctx);
        if ctx.cursor != open + 1 {
            return None;
        }
        let inner = content(ctx.tokens, open, ctx.block_end);
        Some(DeleteOutcome::splice(
            ctx,
            ctx.command_index..=ctx.block_end,
            inner,
            ctx.command_index,
        ))
    }

    fn entrance_index(&self, ctx: &StructureContext, side: Side) -> usize {
        match side {
            Side::Left => ctx.command_index + 2,
            Side::Right => ctx.block_end,
        }
    }

    fn exit_index(&self, ctx: &StructureContext, direction: Horizontal) -> Option<usize> {
        match direction {
            Horizontal::Left if ctx.cursor == Self::exponent_open(ctx) + 1 => {
                Some(ctx.command_index)
            }
            Horizontal::Right if ctx.cursor == ctx.block_end => Some(ctx.block_end + 1),
            _ => None,
        }
    }
}
