//! Parse failure diagnostics.
//!
//! Both stages fail fast: the first violation aborts the whole parse
//! and surfaces as a single [`Error`]. Every variant carries the source
//! line plus the offending text or token label, so a failed parse is
//! debuggable without re-running anything.

use thiserror::Error;

/// Coarse classification of parse failures, one per validation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before scanning (empty or whitespace-only).
    Input,
    /// Lexical violation detected by the scanner.
    Lexical,
    /// Structural violation detected by the parser.
    Structural,
    /// Nesting ceiling exceeded.
    DepthExceeded,
}

/// A parse failure.
///
/// No partial value tree is ever exposed alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input had no non-whitespace characters at all.
    #[error("input is empty or contains only whitespace")]
    EmptyInput,

    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} on line {line}")]
    UnexpectedCharacter { ch: char, line: usize },

    /// An alphanumeric run that is not `true`, `false`, or `null`.
    #[error("unexpected keyword {word:?} on line {line}")]
    UnexpectedKeyword { word: String, line: usize },

    /// End of input reached before a string's closing quote.
    #[error("unexpected end of input in string starting on line {line}")]
    UnterminatedString { line: usize },

    /// A backslash followed by an illegal escape character.
    #[error("invalid escape character {ch:?} in string on line {line}")]
    InvalidEscape { ch: char, line: usize },

    /// A `\u` escape that is not four hex digits or a valid code point.
    #[error("invalid unicode escape on line {line}: {reason}")]
    InvalidUnicodeEscape { reason: &'static str, line: usize },

    /// A raw code point below `0x20` inside a string.
    #[error("illegal control character {code:#04x} in string on line {line}")]
    ControlCharacter { code: u8, line: usize },

    /// A number literal that deviates from the JSON number grammar.
    #[error("malformed number literal {literal:?} on line {line}: {reason}")]
    MalformedNumber {
        literal: String,
        reason: &'static str,
        line: usize,
    },

    /// A token of the wrong kind where a value or delimiter was required.
    #[error("expected {expected} but found {found} on line {line}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
        line: usize,
    },

    /// A non-string token in object key position.
    #[error("object keys must be strings, found {found} on line {line}")]
    NonStringKey { found: &'static str, line: usize },

    /// A comma immediately before a closing delimiter.
    #[error("trailing comma before {close} on line {line}")]
    TrailingComma { close: &'static str, line: usize },

    /// The token sequence ended mid-structure.
    #[error("unexpected end of input on line {line}")]
    UnexpectedEndOfInput { line: usize },

    /// A token left over after the root value fully reduced.
    #[error("extra value after close: {found} on line {line}")]
    TrailingContent { found: &'static str, line: usize },

    /// Strict-root mode only: a scalar at the top level.
    #[error("document root must be an object or array, found {found} on line {line}")]
    NonContainerRoot { found: &'static str, line: usize },

    /// More simultaneously open `{`/`[` contexts than the ceiling allows.
    #[error("maximum nesting depth {max} exceeded on line {line}")]
    DepthExceeded {
        depth: usize,
        max: usize,
        line: usize,
    },
}

impl Error {
    /// Classify this error into the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::Input,
            Error::UnexpectedCharacter { .. }
            | Error::UnexpectedKeyword { .. }
            | Error::UnterminatedString { .. }
            | Error::InvalidEscape { .. }
            | Error::InvalidUnicodeEscape { .. }
            | Error::ControlCharacter { .. }
            | Error::MalformedNumber { .. } => ErrorKind::Lexical,
            Error::UnexpectedToken { .. }
            | Error::NonStringKey { .. }
            | Error::TrailingComma { .. }
            | Error::UnexpectedEndOfInput { .. }
            | Error::TrailingContent { .. }
            | Error::NonContainerRoot { .. } => ErrorKind::Structural,
            Error::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    /// Source line the failure was detected on, where one exists.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::EmptyInput => None,
            Error::UnexpectedCharacter { line, .. }
            | Error::UnexpectedKeyword { line, .. }
            | Error::UnterminatedString { line }
            | Error::InvalidEscape { line, .. }
            | Error::InvalidUnicodeEscape { line, .. }
            | Error::ControlCharacter { line, .. }
            | Error::MalformedNumber { line, .. }
            | Error::UnexpectedToken { line, .. }
            | Error::NonStringKey { line, .. }
            | Error::TrailingComma { line, .. }
            | Error::UnexpectedEndOfInput { line }
            | Error::TrailingContent { line, .. }
            | Error::NonContainerRoot { line, .. }
            | Error::DepthExceeded { line, .. } => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::Input);
        assert_eq!(
            Error::UnterminatedString { line: 2 }.kind(),
            ErrorKind::Lexical
        );
        assert_eq!(
            Error::TrailingComma { close: "']'", line: 1 }.kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            Error::DepthExceeded { depth: 21, max: 20, line: 1 }.kind(),
            ErrorKind::DepthExceeded
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = Error::UnexpectedToken {
            expected: "',' or '}'",
            found: "number",
            line: 4,
        };
        assert_eq!(err.to_string(), "expected ',' or '}' but found number on line 4");
        assert_eq!(err.line(), Some(4));

        let err = Error::MalformedNumber {
            literal: "01".into(),
            reason: "leading zero",
            line: 1,
        };
        assert!(err.to_string().contains("leading zero"));
    }
}
