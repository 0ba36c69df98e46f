//! Expression calculator for token values
//!
//! Normalizes arithmetic in token values to concrete `rem` quantities:
//! `16px` becomes `1rem`, `0.75rem + 0.125rem` becomes `0.875rem`. Values
//! the calculator has no business touching (disallowed units like `%` or
//! `vh`, bare dimensionless numbers, identifiers, `var(...)` wrappers)
//! are returned unchanged. Only structurally broken arithmetic is an error.

pub mod lexer;

use thiserror::Error;

pub use lexer::{LexError, Lexer, Token};

// The lalrpop generated parser (generated at build time from
// src/expr/expr.lalrpop)
lalrpop_mod!(#[allow(clippy::all)] expr_parser, "/expr/expr.rs");

/// Error for a value that looks arithmetic but cannot be evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A character no value form allows
    #[error("unexpected symbol `{symbol}` at offset {offset} in `{input}`")]
    UnexpectedSymbol {
        input: String,
        symbol: String,
        offset: usize,
    },

    /// Operator/operand structure is wrong (`1rem + + 2px`, `(1rem`)
    #[error("malformed expression `{0}`")]
    Malformed(String),

    /// Division by zero and friends
    #[error("expression `{0}` does not evaluate to a finite number")]
    NotFinite(String),
}

/// Evaluate a token value, returning its normalized form.
///
/// Decimal commas between digits are rewritten to dots before lexing, so
/// `0,75rem + 0,125rem` and `0.75rem + 0.125rem` are the same expression.
pub fn calculate(input: &str) -> Result<String, CalcError> {
    let text = normalize_decimal_commas(input);

    let mut tokens = Vec::new();
    for item in Lexer::new(&text) {
        let (start, tok, end) = item.map_err(|e| CalcError::UnexpectedSymbol {
            input: input.to_string(),
            symbol: e.slice,
            offset: e.span.start,
        })?;
        // One opaque token makes the whole value opaque.
        if tok.is_opaque() {
            return Ok(input.to_string());
        }
        tokens.push((start, tok, end));
    }

    match tokens.as_slice() {
        // Empty and single-bare-number values pass through untouched.
        [] | [(_, Token::Number(_), _)] => return Ok(input.to_string()),
        _ => {}
    }

    let value = expr_parser::ExprParser::new()
        .parse(tokens.into_iter().map(Ok))
        .map_err(|_| CalcError::Malformed(input.to_string()))?;

    if !value.is_finite() {
        return Err(CalcError::NotFinite(input.to_string()));
    }

    Ok(format!("{value}rem"))
}

/// Rewrite decimal commas (`0,5`) to dots. Only a comma squeezed between
/// two digits qualifies; list commas in font stacks are untouched.
fn normalize_decimal_commas(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.char_indices() {
        let is_decimal = c == ','
            && i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit());
        out.push(if is_decimal { '.' } else { c });
    }
    out
}
