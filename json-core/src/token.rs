//! Lexical tokens produced by the scanner.
//!
//! Token kinds form a closed set consumed by exhaustive matching in the
//! parser, so adding a kind is a compile-time-checked change everywhere.
//! Literal kinds carry their decoded payload: strings arrive fully
//! unescaped, numbers keep the raw literal so the parser can choose
//! between integer and float decoding at consumption time.

use std::fmt;

/// A lexical token kind, with decoded payloads on the literal kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// String literal, escapes already resolved.
    String(String),
    /// Number literal, kept raw for later numeric decoding.
    Number(String),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// End-of-input sentinel, always the final token of a scan.
    Eof,
}

impl TokenKind {
    /// Human-readable label used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::String(_) => "string",
            TokenKind::Number(_) => "number",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Null => "null",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexical unit and the line it started on.
///
/// Immutable once produced; the token sequence is append-only during
/// scanning and read through a forward-only cursor during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }

    /// Check whether this is the end-of-input sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
