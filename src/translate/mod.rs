//! Token stream → evaluable expression
//!
//! A recursive-descent pass over the flat sequence: `parse_expression`
//! concatenates operators and factors over a span, `parse_factor` handles one
//! value, command or bracket group. Constructs that do not linearize
//! (integrals, sums, limits, differentials) are declined up front so the host
//! can route the formula elsewhere.

mod scope;

use std::fmt;

use crate::model::scan::matching_close;
use crate::model::{Token, TokenKind};

pub use scope::{AngleMode, Scope, ScopeFn, ScopeValue};

/// Symbols that make a formula untranslatable
pub const DENYLIST: &[&str] = &["\\int", "\\sum", "\\lim", "\\prod", "d", "dx"];

const TRIG_FUNCTIONS: &[&str] = &[
    "\\sin", "\\cos", "\\tan", "\\cot", "\\sec", "\\csc", "\\sinh", "\\cosh", "\\tanh",
    "\\arcsin", "\\arccos", "\\arctan",
];

/// Expression plus the scope it should be evaluated in
#[derive(Debug, Clone)]
pub struct Translation {
    pub expression: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotTranslatable {
    /// Contains a symbol from [`DENYLIST`]
    Denylisted(String),
    /// Nothing to evaluate yet
    Empty,
}

impl fmt::Display for NotTranslatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotTranslatable::Denylisted(symbol) => {
                write!(f, "'{}' cannot be evaluated directly", symbol)
            }
            NotTranslatable::Empty => write!(f, "Nothing to evaluate"),
        }
    }
}

impl std::error::Error for NotTranslatable {}

/// Result of parsing a span: the expression and the index after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub expression: String,
    pub next: usize,
}

impl Parsed {
    fn new(expression: impl Into<String>, next: usize) -> Self {
        Self {
            expression: expression.into(),
            next,
        }
    }
}

/// Translate a whole sequence for evaluation
pub fn translate(tokens: &[Token], mode: AngleMode) -> Result<Translation, NotTranslatable> {
    let expression = translate_expression(tokens)?;
    Ok(Translation {
        expression,
        scope: Scope::standard(mode),
    })
}

/// Expression string only, without a scope
pub fn translate_expression(tokens: &[Token]) -> Result<String, NotTranslatable> {
    if let Some(token) = tokens.iter().find(|t| is_denylisted(&t.value)) {
        tracing::debug!("Declining translation: '{}' does not linearize", token.value);
        return Err(NotTranslatable::Denylisted(token.value.clone()));
    }

    let parsed = parse_expression(tokens, 0, tokens.len());
    let expression = parsed.expression.trim();
    if expression.is_empty() || expression == "()" {
        return Err(NotTranslatable::Empty);
    }
    Ok(expression.to_string())
}

/// `\int` and also `\int\,`
fn is_denylisted(value: &str) -> bool {
    let base = value.strip_suffix("\\,").unwrap_or(value);
    DENYLIST.contains(&value) || DENYLIST.contains(&base)
}

fn operator(value: &str) -> Option<&'static str> {
    Some(match value {
        "\\cdot" | "\\times" => "*",
        "\\div" => "/",
        "+" => "+",
        "-" => "-",
        "^" => "^",
        "=" => "==",
        "\\le" => "<=",
        "\\ge" => ">=",
        "\\mod" => " mod ",
        _ => return None,
    })
}

/// Closing bracket index for the group at `open`, or the end of the sequence
fn group_end(tokens: &[Token], open: usize) -> usize {
    matching_close(tokens, open).unwrap_or(tokens.len())
}

/// Concatenate operators and factors over `[start, end)`
pub fn parse_expression(tokens: &[Token], start: usize, end: usize) -> Parsed {
    let end = end.min(tokens.len());
    let mut expression = String::new();
    let mut i = start;

    while i < end {
        let token = &tokens[i];

        if let Some(op) = operator(&token.value) {
            expression.push_str(op);
            i += 1;
            continue;
        }
        if token.kind == TokenKind::StructureMarker {
            i += 1;
            continue;
        }

        let starts_factor = matches!(
            token.kind,
            TokenKind::Command | TokenKind::Number | TokenKind::Variable
        ) || token.is_open_bracket();
        if starts_factor {
            let factor = parse_factor(tokens, i);
            expression.push_str(&factor.expression);
            i = factor.next.max(i + 1);
        } else {
            expression.push_str(&token.value);
            i += 1;
        }
    }

    Parsed::new(expression, i)
}

/// One value, command application or bracket group starting at `index`
pub fn parse_factor(tokens: &[Token], index: usize) -> Parsed {
    let Some(token) = tokens.get(index) else {
        return Parsed::new("", index);
    };

    match token.value.as_str() {
        "\\pi" => Parsed::new("pi", index + 1),
        "e" => Parsed::new("e", index + 1),
        "\\infty" => Parsed::new("Infinity", index + 1),
        "\\frac" => {
            let numerator = extract_block(tokens, index + 1);
            let denominator = extract_block(tokens, numerator.next);
            Parsed::new(
                format!("({})/({})", numerator.expression, denominator.expression),
                denominator.next,
            )
        }
        "\\sqrt" => {
            let mut degree = "2".to_string();
            let mut cursor = index + 1;
            if tokens.get(cursor).is_some_and(|t| t.is("[")) {
                let close = group_end(tokens, cursor);
                degree = parse_expression(tokens, cursor + 1, close).expression;
                cursor = close + 1;
            }
            let body = extract_block(tokens, cursor);
            Parsed::new(format!("nthRoot({},{})", body.expression, degree), body.next)
        }
        "\\log" => {
            let mut cursor = index + 1;
            let mut base = None;
            if tokens.get(cursor).is_some_and(|t| t.is("_")) {
                let block = extract_block(tokens, cursor + 1);
                cursor = block.next;
                base = Some(block.expression);
            }
            let argument = parse_argument(tokens, cursor);
            let expression = match base.as_deref() {
                None | Some("10") => format!("log10({})", argument.expression),
                Some(base) => format!("log({},{})", argument.expression, base),
            };
            Parsed::new(expression, argument.next)
        }
        "\\ln" => {
            let argument = parse_argument(tokens, index + 1);
            Parsed::new(format!("log({})", argument.expression), argument.next)
        }
        "\\lg" => {
            let argument = parse_argument(tokens, index + 1);
            Parsed::new(format!("log10({})", argument.expression), argument.next)
        }
        name if TRIG_FUNCTIONS.contains(&name) => {
            let bare = &name[1..];
            let mut cursor = index + 1;
            let function = if is_inverse_marker(tokens, cursor) {
                cursor += 5;
                format!("a{}", bare)
            } else if let Some(rest) = bare.strip_prefix("arc") {
                format!("a{}", rest)
            } else {
                bare.to_string()
            };
            let argument = parse_argument(tokens, cursor);
            Parsed::new(format!("{}({})", function, argument.expression), argument.next)
        }
        "(" | "[" => {
            let close = group_end(tokens, index);
            let inner = parse_expression(tokens, index + 1, close);
            Parsed::new(format!("({})", inner.expression), close + 1)
        }
        "{" => {
            let block = extract_block(tokens, index);
            Parsed::new(format!("({})", block.expression), block.next)
        }
        value => Parsed::new(value, index + 1),
    }
}

/// Function argument; a single bracket group is not parenthesized twice
fn parse_argument(tokens: &[Token], index: usize) -> Parsed {
    match tokens.get(index) {
        Some(token) if token.is_open_bracket() => {
            let close = group_end(tokens, index);
            let inner = parse_expression(tokens, index + 1, close);
            Parsed::new(inner.expression, close + 1)
        }
        _ => parse_factor(tokens, index),
    }
}

/// Content of the `{…}` at `start`, tolerating a missing brace mid-edit
fn extract_block(tokens: &[Token], start: usize) -> Parsed {
    if !tokens.get(start).is_some_and(|t| t.is("{")) {
        return parse_factor(tokens, start);
    }
    let close = group_end(tokens, start);
    let inner = parse_expression(tokens, start + 1, close);
    Parsed::new(inner.expression, close + 1)
}

/// `^ { - 1 }` right after a function name
fn is_inverse_marker(tokens: &[Token], start: usize) -> bool {
    let expected = ["^", "{", "-", "1", "}"];
    tokens
        .get(start..start + expected.len())
        .is_some_and(|window| window.iter().zip(expected).all(|(t, v)| t.is(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(src: &str) -> Vec<Token> {
        src.split_whitespace().map(Token::classified).collect()
    }

    fn expr(src: &str) -> Result<String, NotTranslatable> {
        translate_expression(&seq(src))
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(expr("2 \\cdot 3 + 4 \\div 2"), Ok("2*3+4/2".to_string()));
        assert_eq!(expr("x = 1"), Ok("x==1".to_string()));
        assert_eq!(expr("1 \\le 2"), Ok("1<=2".to_string()));
    }

    #[test]
    fn test_fraction() {
        assert_eq!(expr("\\frac { 1 } { 2 + 3 }"), Ok("(1)/(2+3)".to_string()));
    }

    #[test]
    fn test_roots() {
        assert_eq!(expr("\\sqrt [ 3 ] { 8 }"), Ok("nthRoot(8,3)".to_string()));
        assert_eq!(expr("\\sqrt { 2 }"), Ok("nthRoot(2,2)".to_string()));
    }

    #[test]
    fn test_logarithms() {
        assert_eq!(expr("\\log _ { 2 } ( 8 )"), Ok("log(8,2)".to_string()));
        assert_eq!(expr("\\log ( 1 0 0 )"), Ok("log10(100)".to_string()));
        assert_eq!(expr("\\log _ { 10 } ( x )"), Ok("log10(x)".to_string()));
        assert_eq!(expr("\\ln ( e )"), Ok("log(e)".to_string()));
        assert_eq!(expr("\\lg 5"), Ok("log10(5)".to_string()));
    }

    #[test]
    fn test_trig() {
        assert_eq!(expr("\\sin ( x )"), Ok("sin(x)".to_string()));
        assert_eq!(expr("\\sin ^ { - 1 } ( x )"), Ok("asin(x)".to_string()));
        assert_eq!(expr("\\arccos ( 1 )"), Ok("acos(1)".to_string()));
        assert_eq!(expr("\\tan \\pi"), Ok("tan(pi)".to_string()));
    }

    #[test]
    fn test_constants_and_power() {
        assert_eq!(expr("2 \\pi"), Ok("2pi".to_string()));
        assert_eq!(expr("x ^ { 2 }"), Ok("x^(2)".to_string()));
        assert_eq!(expr("\\infty"), Ok("Infinity".to_string()));
    }

    #[test]
    fn test_groups() {
        assert_eq!(expr("[ 1 + 2 ] \\cdot 3"), Ok("(1+2)*3".to_string()));
        assert_eq!(expr("( 1 + 2"), Ok("(1+2)".to_string()));
    }

    #[test]
    fn test_denylist() {
        let mut tokens = seq("\\int _ { 0 } ^ { 1 } x d x");
        tokens[5] = Token::marker("^");
        assert_eq!(
            translate_expression(&tokens),
            Err(NotTranslatable::Denylisted("\\int".to_string()))
        );
        assert_eq!(
            expr("\\lim _ { x } 1"),
            Err(NotTranslatable::Denylisted("\\lim".to_string()))
        );
        assert!(is_denylisted("\\int\\,"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(expr(""), Err(NotTranslatable::Empty));
        assert_eq!(expr("( )"), Err(NotTranslatable::Empty));
    }

    #[test]
    fn test_translation_carries_scope() {
        let translation = translate(&seq("1 + 1"), AngleMode::Degree).unwrap();
        assert_eq!(translation.expression, "1+1");
        assert!(translation.scope.get("sin").is_some());
    }
}
