//! `\log _ {base}`, usually followed by a parenthesized argument

use super::{DeleteOutcome, Horizontal, Side, StructureContext, StructureStrategy};

pub struct LogStrategy;

impl LogStrategy {
    /// Opening brace of the base, when the head is written `\log _ {…}`
    fn base_open(ctx: &StructureContext) -> Option<usize> {
        let separator = ctx.tokens.get(ctx.command_index + 1)?;
        if !(separator.is_marker() || separator.is("_")) {
            return None;
        }
        let open = ctx.command_index + 2;
        ctx.tokens.get(open)?.is("{").then_some(open)
    }
}

impl StructureStrategy for LogStrategy {
    fn on_move_up(&self, _ctx: &StructureContext) -> Option<usize> {
        None
    }

    fn on_move_down(&self, _ctx: &StructureContext) -> Option<usize> {
        None
    }

    fn on_delete(&self, ctx: &StructureContext) -> Option<DeleteOutcome> {
        let open = Self::base_open(ctx)?;
        if ctx.cursor != open + 1 {
            return None;
        }
        if ctx.block_end != open + 1 {
            // Base still has content
            return Some(DeleteOutcome::unchanged(ctx, ctx.cursor));
        }
        Some(DeleteOutcome::splice(
            ctx,
            ctx.command_index..=ctx.block_end,
            Vec::new(),
            ctx.command_index,
        ))
    }

    fn entrance_index(&self, ctx: &StructureContext, side: Side) -> usize {
        match side {
            Side::Left => Self::base_open(ctx)
                .map(|open| open + 1)
                .unwrap_or(ctx.command_index + 1),
            Side::Right => ctx.block_end,
        }
    }

    fn exit_index(&self, ctx: &StructureContext, direction: Horizontal) -> Option<usize> {
        let open = Self::base_open(ctx)?;
        match direction {
            Horizontal::Left if ctx.cursor == open + 1 => Some(ctx.command_index),
            Horizontal::Right if ctx.cursor == ctx.block_end => {
                // Step straight into the argument parentheses
                let followed_by_paren = ctx
                    .tokens
                    .get(ctx.block_end + 1)
                    .is_some_and(|token| token.is("("));
                Some(ctx.block_end + if followed_by_paren { 2 } else { 1 })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::values;
    use crate::model::Token;
    use crate::structure::{StructureKind, StructureSpan};

    fn seq(src: &str) -> Vec<Token> {
        src.split_whitespace().map(Token::classified).collect()
    }

    fn ctx(tokens: &[Token], cursor: usize, block_end: usize) -> StructureContext<'_> {
        StructureSpan {
            kind: StructureKind::Logarithm,
            command_index: 0,
            block_start: 0,
            block_end,
        }
        .context(tokens, cursor)
    }

    // 0:\log 1:_ 2:{ 3:2 4:} 5:( 6:x 7:)

    #[test]
    fn test_no_vertical_movement() {
        let tokens = seq("\\log _ { 2 } ( x )");
        assert_eq!(LogStrategy.on_move_up(&ctx(&tokens, 3, 4)), None);
        assert_eq!(LogStrategy.on_move_down(&ctx(&tokens, 3, 4)), None);
    }

    #[test]
    fn test_exit_right_enters_argument() {
        let tokens = seq("\\log _ { 2 } ( x )");
        assert_eq!(LogStrategy.exit_index(&ctx(&tokens, 4, 4), Horizontal::Right), Some(6));
        assert_eq!(LogStrategy.exit_index(&ctx(&tokens, 3, 4), Horizontal::Left), Some(0));

        let bare = seq("\\log _ { 2 } x");
        assert_eq!(LogStrategy.exit_index(&ctx(&bare, 4, 4), Horizontal::Right), Some(5));
    }

    #[test]
    fn test_entrance() {
        let tokens = seq("\\log _ { 2 } ( x )");
        assert_eq!(LogStrategy.entrance_index(&ctx(&tokens, 0, 4), Side::Left), 3);
        assert_eq!(LogStrategy.entrance_index(&ctx(&tokens, 5, 4), Side::Right), 4);
    }

    #[test]
    fn test_delete_empty_base_removes_head() {
        // 0:\log 1:_ 2:{ 3:} 4:( 5:x 6:)
        let tokens = seq("\\log _ { } ( x )");
        let outcome = LogStrategy.on_delete(&ctx(&tokens, 3, 3)).unwrap();
        assert_eq!(values(&outcome.tokens), vec!["(", "x", ")"]);
        assert_eq!(outcome.cursor, 0);
    }

    #[test]
    fn test_delete_non_empty_base_is_blocked() {
        let tokens = seq("\\log _ { 2 } ( x )");
        let outcome = LogStrategy.on_delete(&ctx(&tokens, 3, 4)).unwrap();
        assert_eq!(outcome.tokens, tokens);
        assert_eq!(outcome.cursor, 3);
        assert!(LogStrategy.on_delete(&ctx(&tokens, 4, 4)).is_none());
    }
}
