//! Limits layout: `\int _ {lower} ^ {upper}`
//!
//! Shared by every big operator that takes a lower and an upper limit.

use super::{next_block_open, DeleteOutcome, Horizontal, Side, StructureContext, StructureStrategy};
use crate::model::scan::matching_close;
use crate::model::Token;

#[derive(Debug, Clone, Copy)]
struct Limits {
    lower_open: usize,
    lower_close: usize,
    upper_open: usize,
    upper_close: usize,
}

impl Limits {
    fn locate(tokens: &[Token], command_index: usize) -> Option<Self> {
        let lower_open = next_block_open(tokens, command_index + 1)?;
        let lower_close = matching_close(tokens, lower_open)?;
        let upper_open = next_block_open(tokens, lower_close + 1)?;
        let upper_close = matching_close(tokens, upper_open)?;
        Some(Self {
            lower_open,
            lower_close,
            upper_open,
            upper_close,
        })
    }

    fn in_lower(&self, cursor: usize) -> bool {
        cursor > self.lower_open && cursor <= self.lower_close
    }

    fn in_upper(&self, cursor: usize) -> bool {
        cursor > self.upper_open && cursor <= self.upper_close
    }

    fn lower_is_empty(&self) -> bool {
        self.lower_close == self.lower_open + 1
    }

    fn upper_is_empty(&self) -> bool {
        self.upper_close == self.upper_open + 1
    }
}

pub struct IntegralStrategy;

impl StructureStrategy for IntegralStrategy {
    fn on_move_up(&self, ctx: &StructureContext) -> Option<usize> {
        let limits = Limits::locate(ctx.tokens, ctx.command_index)?;
        limits.in_lower(ctx.cursor).then_some(limits.upper_close)
    }

    fn on_move_down(&self, ctx: &StructureContext) -> Option<usize> {
        let limits = Limits::locate(ctx.tokens, ctx.command_index)?;
        limits.in_upper(ctx.cursor).then_some(limits.lower_close)
    }

    fn on_delete(&self, ctx: &StructureContext) -> Option<DeleteOutcome> {
        let limits = Limits::locate(ctx.tokens, ctx.command_index)?;
        let at_lower = ctx.cursor == limits.lower_open + 1;
        let at_upper = ctx.cursor == limits.upper_open + 1;
        if !at_lower && !at_upper {
            return None;
        }

        let outcome = match (limits.lower_is_empty(), limits.upper_is_empty()) {
            (true, true) => DeleteOutcome::splice(
                ctx,
                ctx.command_index..=ctx.block_end,
                Vec::new(),
                ctx.command_index,
            ),
            // Nothing to delete here, go to the other limit instead
            (true, false) if at_lower => DeleteOutcome::unchanged(ctx, limits.upper_close),
            (false, true) if at_upper => DeleteOutcome::unchanged(ctx, limits.lower_close),
            // Non-empty limit: blocked until it is emptied
            _ => DeleteOutcome::unchanged(ctx, ctx.cursor),
        };
        Some(outcome)
    }

    fn entrance_index(&self, ctx: &StructureContext, side: Side) -> usize {
        match side {
            Side::Left => Limits::locate(ctx.tokens, ctx.command_index)
                .map(|limits| limits.lower_open + 1)
                .unwrap_or(ctx.command_index + 3),
            Side::Right => ctx.block_end,
        }
    }

    fn exit_index(&self, ctx: &StructureContext, direction: Horizontal) -> Option<usize> {
        let limits = Limits::locate(ctx.tokens, ctx.command_index)?;
        match direction {
            Horizontal::Left => {
                if ctx.cursor == limits.lower_open + 1 {
                    Some(ctx.command_index)
                } else if ctx.cursor == limits.upper_open + 1 {
                    Some(limits.lower_close)
                } else {
                    None
                }
            }
            Horizontal::Right => {
                if ctx.cursor == limits.lower_close {
                    Some(limits.upper_open + 1)
                } else if ctx.cursor == limits.upper_close {
                    Some(ctx.block_end + 1)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::values;
    use crate::structure::{StructureKind, StructureSpan};

    /// `\int _ { <lower> } ^ { <upper> } d x`
    fn integral(lower: &[&str], upper: &[&str]) -> Vec<Token> {
        let mut tokens = vec![Token::command("\\int"), Token::marker("_"), Token::bracket("{")];
        tokens.extend(lower.iter().map(|v| Token::classified(*v)));
        tokens.push(Token::bracket("}"));
        tokens.push(Token::marker("^"));
        tokens.push(Token::bracket("{"));
        tokens.extend(upper.iter().map(|v| Token::classified(*v)));
        tokens.push(Token::bracket("}"));
        tokens.push(Token::variable("d"));
        tokens.push(Token::variable("x"));
        tokens
    }

    fn ctx(tokens: &[Token], cursor: usize) -> StructureContext<'_> {
        StructureSpan {
            kind: StructureKind::Integral,
            command_index: 0,
            block_start: 0,
            block_end: tokens.len() - 3,
        }
        .context(tokens, cursor)
    }

    // 0:\int 1:_ 2:{ 3:a 4:} 5:^ 6:{ 7:b 8:} 9:d 10:x

    #[test]
    fn test_vertical_jumps_to_limit_ends() {
        let tokens = integral(&["a"], &["b"]);
        assert_eq!(IntegralStrategy.on_move_up(&ctx(&tokens, 3)), Some(8));
        assert_eq!(IntegralStrategy.on_move_down(&ctx(&tokens, 7)), Some(4));
        assert_eq!(IntegralStrategy.on_move_down(&ctx(&tokens, 3)), None);
        assert_eq!(IntegralStrategy.on_move_up(&ctx(&tokens, 8)), None);
    }

    #[test]
    fn test_horizontal_between_limits() {
        let tokens = integral(&["a"], &["b"]);
        let s = IntegralStrategy;
        assert_eq!(s.exit_index(&ctx(&tokens, 4), Horizontal::Right), Some(7));
        assert_eq!(s.exit_index(&ctx(&tokens, 7), Horizontal::Left), Some(4));
        assert_eq!(s.exit_index(&ctx(&tokens, 3), Horizontal::Left), Some(0));
        assert_eq!(s.exit_index(&ctx(&tokens, 8), Horizontal::Right), Some(9));
        assert_eq!(s.entrance_index(&ctx(&tokens, 0), Side::Left), 3);
        assert_eq!(s.entrance_index(&ctx(&tokens, 9), Side::Right), 8);
    }

    #[test]
    fn test_delete_with_both_limits_empty_removes_structure() {
        let tokens = integral(&[], &[]);
        // 0:\int 1:_ 2:{ 3:} 4:^ 5:{ 6:} 7:d 8:x
        for cursor in [3, 6] {
            let outcome = IntegralStrategy.on_delete(&ctx(&tokens, cursor)).unwrap();
            assert_eq!(values(&outcome.tokens), vec!["d", "x"]);
            assert_eq!(outcome.cursor, 0);
        }
    }

    #[test]
    fn test_delete_in_empty_lower_relocates_to_upper_end() {
        let tokens = integral(&[], &["b"]);
        // 0:\int 1:_ 2:{ 3:} 4:^ 5:{ 6:b 7:} 8:d 9:x
        let outcome = IntegralStrategy.on_delete(&ctx(&tokens, 3)).unwrap();
        assert_eq!(outcome.tokens, tokens);
        assert_eq!(outcome.cursor, 7);
    }

    #[test]
    fn test_delete_in_empty_upper_relocates_to_lower_end() {
        let tokens = integral(&["a"], &[]);
        // 0:\int 1:_ 2:{ 3:a 4:} 5:^ 6:{ 7:} 8:d 9:x
        let outcome = IntegralStrategy.on_delete(&ctx(&tokens, 7)).unwrap();
        assert_eq!(outcome.tokens, tokens);
        assert_eq!(outcome.cursor, 4);
    }

    #[test]
    fn test_delete_at_non_empty_limit_is_blocked() {
        let tokens = integral(&["a"], &["b"]);
        let outcome = IntegralStrategy.on_delete(&ctx(&tokens, 3)).unwrap();
        assert_eq!(outcome.tokens, tokens);
        assert_eq!(outcome.cursor, 3);
        assert!(IntegralStrategy.on_delete(&ctx(&tokens, 4)).is_none());
    }
}
