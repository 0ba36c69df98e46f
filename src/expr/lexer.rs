//! Lexer for token value expressions using logos
//!
//! A value string is either an arithmetic expression over `px`/`rem`
//! quantities (which the calculator evaluates) or an opaque CSS value
//! (disallowed units, identifiers, `var(...)` wrappers, strings) that must
//! pass through untouched. The lexer tags both kinds so the calculator can
//! decide without guessing.

use logos::Logos;

/// Token type for the value lexer
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")] // Skip whitespace
pub enum Token {
    // Operators
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    // Quantities. `px` is converted to rem-space (1rem = 16px) directly in
    // the lexer so the grammar only ever sees plain numbers.
    #[regex(r"[0-9]+(\.[0-9]+)?px", |lex| {
        let s = lex.slice();
        s[..s.len() - 2].parse::<f64>().map(|v| v / 16.0).ok()
    })]
    Px(f64),

    #[regex(r"[0-9]+(\.[0-9]+)?rem", |lex| {
        let s = lex.slice();
        s[..s.len() - 3].parse::<f64>().ok()
    })]
    Rem(f64),

    // Bare number (dimensionless: line-height, font-weight, z-index)
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Units the calculator must not touch. A value containing any of these
    // is returned verbatim.
    #[regex(r"[0-9]+(\.[0-9]+)?(%|em|ex|ch|vw|vh|vmin|vmax|deg|rad|grad|turn|pt|pc|cm|mm|in|fr|ms|s)")]
    OtherUnit,

    // `var(--x)` / `var(--x, fallback)` wrappers stay verbatim
    #[regex(r"var\([^)]*\)")]
    Var,

    // Hex colors never participate in arithmetic
    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    // Quoted strings (font stacks)
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Str,

    // Identifiers (keywords like `auto`, font names, bare `em`)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token(",")]
    Comma,
}

impl Token {
    /// True when the token marks the whole value as opaque (not arithmetic)
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Token::OtherUnit
                | Token::Var
                | Token::HexColor
                | Token::Str
                | Token::Ident
                | Token::Comma
        )
    }
}

/// Wrapper for lexer with position tracking
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Token::lexer(source),
            source,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<(usize, Token, usize), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let span = self.inner.span();

        match token {
            Ok(tok) => Some(Ok((span.start, tok, span.end))),
            Err(_) => Some(Err(LexError {
                span: span.clone(),
                slice: self.source[span].to_string(),
            })),
        }
    }
}

/// An input character no token rule covers
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: std::ops::Range<usize>,
    pub slice: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected symbol '{}' at position {}",
            self.slice, self.span.start
        )
    }
}

impl std::error::Error for LexError {}
