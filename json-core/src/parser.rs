//! Recursive descent parser over the scanned token sequence.
//!
//! Three mutually recursive operations mirror the value grammar:
//! `parse_value`, `parse_object`, `parse_array`. The parser owns the
//! single authoritative nesting counter; `enter`/`leave` bracket every
//! object and array and enforce the ceiling, so recursion depth is
//! bounded no matter what the input nests.
//!
//! Fail-fast: the first structural violation propagates straight out
//! and no partially built value escapes.

use indexmap::IndexMap;

use crate::error::Error;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Default nesting ceiling: simultaneously open `{`/`[` contexts.
pub const MAX_DEPTH: usize = 20;

/// Structural policy for a parse.
///
/// `container_root` preserves the stricter historical policy of
/// requiring the document to start with `{` or `[`; the default accepts
/// any value at the root, per the current JSON standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of simultaneously open object/array contexts.
    pub max_depth: usize,
    /// Require the root value to be an object or array.
    pub container_root: bool,
}

impl Options {
    /// Any value is legal at the root.
    pub const fn permissive() -> Self {
        Options {
            max_depth: MAX_DEPTH,
            container_root: false,
        }
    }

    /// The root must be an object or array.
    pub const fn container_root() -> Self {
        Options {
            max_depth: MAX_DEPTH,
            container_root: true,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::permissive()
    }
}

/// Recursive descent parser with a forward-only cursor.
///
/// Constructed fresh per parse, used once, discarded.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    options: Options,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, Options::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: Options) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parse the token sequence into the single root value.
    ///
    /// Every non-`Eof` token must be consumed; anything left after the
    /// root value fully reduces is "extra value after close".
    pub fn parse_document(&mut self) -> Result<Value, Error> {
        if self.options.container_root {
            match self.peek()?.kind {
                TokenKind::LBrace | TokenKind::LBracket | TokenKind::Eof => {}
                ref kind => {
                    return Err(Error::NonContainerRoot {
                        found: kind.describe(),
                        line: self.peek()?.line,
                    });
                }
            }
        }

        let value = self.parse_value()?;

        let token = self.peek()?;
        if !token.is_eof() {
            return Err(Error::TrailingContent {
                found: token.kind.describe(),
                line: token.line,
            });
        }
        Ok(value)
    }

    /// Current token without consuming it.
    fn peek(&self) -> Result<&Token, Error> {
        self.tokens.get(self.pos).ok_or(Error::UnexpectedEndOfInput {
            line: self.tokens.last().map_or(1, |t| t.line),
        })
    }

    /// Consume and return the current token.
    fn next(&mut self) -> Result<Token, Error> {
        let token = self.peek()?.clone();
        self.pos += 1;
        Ok(token)
    }

    /// Open one `{`/`[` context, enforcing the ceiling.
    fn enter(&mut self, line: usize) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthExceeded {
                depth: self.depth,
                max: self.options.max_depth,
                line,
            });
        }
        Ok(())
    }

    /// Close the innermost open context.
    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse one value, dispatching on the current token kind.
    fn parse_value(&mut self) -> Result<Value, Error> {
        if matches!(self.peek()?.kind, TokenKind::LBrace) {
            return self.parse_object();
        }
        if matches!(self.peek()?.kind, TokenKind::LBracket) {
            return self.parse_array();
        }
        let token = self.next()?;
        match token.kind {
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::Number(literal) => decode_number(&literal, token.line),
            TokenKind::Boolean(b) => Ok(Value::Bool(b)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::Eof => Err(Error::UnexpectedEndOfInput { line: token.line }),
            kind => Err(Error::UnexpectedToken {
                expected: "a value",
                found: kind.describe(),
                line: token.line,
            }),
        }
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        let open = self.next()?; // '{'
        self.enter(open.line)?;

        let mut map = IndexMap::new();
        if matches!(self.peek()?.kind, TokenKind::RBrace) {
            self.next()?;
            self.leave();
            return Ok(Value::Object(map));
        }

        loop {
            let token = self.next()?;
            let key = match token.kind {
                TokenKind::String(s) => s,
                TokenKind::Eof => {
                    return Err(Error::UnexpectedEndOfInput { line: token.line });
                }
                kind => {
                    return Err(Error::NonStringKey {
                        found: kind.describe(),
                        line: token.line,
                    });
                }
            };
            self.expect_colon()?;
            let value = self.parse_value()?;
            // duplicate source keys: last occurrence wins
            map.insert(key, value);

            let sep = self.next()?;
            match sep.kind {
                TokenKind::Comma => {
                    if matches!(self.peek()?.kind, TokenKind::RBrace) {
                        return Err(Error::TrailingComma {
                            close: "'}'",
                            line: self.peek()?.line,
                        });
                    }
                }
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(Error::UnexpectedEndOfInput { line: sep.line });
                }
                kind => {
                    return Err(Error::UnexpectedToken {
                        expected: "',' or '}'",
                        found: kind.describe(),
                        line: sep.line,
                    });
                }
            }
        }

        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        let open = self.next()?; // '['
        self.enter(open.line)?;

        let mut items = Vec::new();
        if matches!(self.peek()?.kind, TokenKind::RBracket) {
            self.next()?;
            self.leave();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            let sep = self.next()?;
            match sep.kind {
                TokenKind::Comma => {
                    if matches!(self.peek()?.kind, TokenKind::RBracket) {
                        return Err(Error::TrailingComma {
                            close: "']'",
                            line: self.peek()?.line,
                        });
                    }
                }
                TokenKind::RBracket => break,
                TokenKind::Eof => {
                    return Err(Error::UnexpectedEndOfInput { line: sep.line });
                }
                kind => {
                    return Err(Error::UnexpectedToken {
                        expected: "',' or ']'",
                        found: kind.describe(),
                        line: sep.line,
                    });
                }
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }

    fn expect_colon(&mut self) -> Result<(), Error> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Colon => Ok(()),
            TokenKind::Eof => Err(Error::UnexpectedEndOfInput { line: token.line }),
            kind => Err(Error::UnexpectedToken {
                expected: "':'",
                found: kind.describe(),
                line: token.line,
            }),
        }
    }
}

/// Decode a lexically validated number literal, keeping the
/// integer/float distinction from its written form. Integer literals
/// that overflow `i64` fall back to the nearest float.
fn decode_number(literal: &str, line: usize) -> Result<Value, Error> {
    let is_integer = !literal.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
    if is_integer {
        if let Ok(n) = literal.parse::<i64>() {
            return Ok(Value::Integer(n));
        }
    }
    match literal.parse::<f64>() {
        Ok(f) => Ok(Value::Float(f)),
        Err(_) => Err(Error::MalformedNumber {
            literal: literal.to_string(),
            reason: "unrepresentable value",
            line,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(input: &str) -> Result<Value, Error> {
        let tokens = Scanner::new(input).scan_tokens()?;
        Parser::new(tokens).parse_document()
    }

    fn parse_opts(input: &str, options: Options) -> Result<Value, Error> {
        let tokens = Scanner::new(input).scan_tokens()?;
        Parser::with_options(tokens, options).parse_document()
    }

    #[test]
    fn test_scalars_at_root() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("42").unwrap(), Value::Integer(42));
        assert_eq!(parse(r#""hi""#).unwrap(), Value::String("hi".into()));
    }

    #[test]
    fn test_container_root_mode() {
        let opts = Options::container_root();
        assert!(parse_opts("{}", opts).is_ok());
        assert!(parse_opts("[1]", opts).is_ok());
        assert_eq!(
            parse_opts("42", opts),
            Err(Error::NonContainerRoot { found: "number", line: 1 })
        );
        assert_eq!(
            parse_opts(r#""hello""#, opts),
            Err(Error::NonContainerRoot { found: "string", line: 1 })
        );
    }

    #[test]
    fn test_number_decoding_classes() {
        assert_eq!(parse("1").unwrap(), Value::Integer(1));
        assert_eq!(parse("-17").unwrap(), Value::Integer(-17));
        assert_eq!(parse("1.0").unwrap(), Value::Float(1.0));
        assert_eq!(parse("1e2").unwrap(), Value::Float(100.0));
        assert_eq!(parse("1E2").unwrap(), Value::Float(100.0));
        assert_eq!(parse("-2.5e-1").unwrap(), Value::Float(-0.25));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            parse("9223372036854775807").unwrap(),
            Value::Integer(i64::MAX)
        );
        assert_eq!(
            parse("9223372036854775808").unwrap(),
            Value::Float(9.223372036854776e18)
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}").unwrap(), Value::Object(IndexMap::new()));
        assert_eq!(parse("[]").unwrap(), Value::Array(Vec::new()));
    }

    #[test]
    fn test_object_members() {
        let value = parse(r#"{"a": 1, "b": [true, null]}"#).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Integer(1)));
        assert_eq!(
            value.get("b"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let value = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(value.get("a"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            parse(r#"{"a" 1}"#),
            Err(Error::UnexpectedToken {
                expected: "':'",
                found: "number",
                line: 1
            })
        );
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            parse(r#"{"a": 1 "b": 2}"#),
            Err(Error::UnexpectedToken {
                expected: "',' or '}'",
                found: "string",
                line: 1
            })
        );
        assert_eq!(
            parse("[1 2]"),
            Err(Error::UnexpectedToken {
                expected: "',' or ']'",
                found: "number",
                line: 1
            })
        );
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(
            parse(r#"{"a": 1,}"#),
            Err(Error::TrailingComma { close: "'}'", line: 1 })
        );
        assert_eq!(
            parse("[1,]"),
            Err(Error::TrailingComma { close: "']'", line: 1 })
        );
    }

    #[test]
    fn test_non_string_key() {
        assert_eq!(
            parse("{1: 2}"),
            Err(Error::NonStringKey { found: "number", line: 1 })
        );
        assert_eq!(
            parse("{true: 2}"),
            Err(Error::NonStringKey { found: "boolean", line: 1 })
        );
    }

    #[test]
    fn test_extra_content_after_root() {
        assert_eq!(
            parse("{} 1"),
            Err(Error::TrailingContent { found: "number", line: 1 })
        );
        assert_eq!(
            parse("[1] [2]"),
            Err(Error::TrailingContent { found: "'['", line: 1 })
        );
        assert_eq!(
            parse("null null"),
            Err(Error::TrailingContent { found: "null", line: 1 })
        );
    }

    #[test]
    fn test_unbalanced_delimiters() {
        assert!(matches!(
            parse("[1, 2"),
            Err(Error::UnexpectedEndOfInput { .. })
        ));
        assert!(matches!(
            parse(r#"{"a": 1"#),
            Err(Error::UnexpectedEndOfInput { .. })
        ));
        assert!(matches!(parse("]"), Err(Error::UnexpectedToken { .. })));
    }

    #[test]
    fn test_depth_boundary() {
        // depth 20 is the last legal level
        let ok = format!("{}1{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&ok).is_ok());

        let too_deep = format!("{}1{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(
            parse(&too_deep),
            Err(Error::DepthExceeded {
                depth: MAX_DEPTH + 1,
                max: MAX_DEPTH,
                line: 1
            })
        );
    }

    #[test]
    fn test_depth_counter_resets_between_siblings() {
        // sibling containers reuse levels; only simultaneous nesting counts
        let inner = format!("{}1{}", "[".repeat(MAX_DEPTH - 1), "]".repeat(MAX_DEPTH - 1));
        let input = format!("[{inner}, {inner}, {inner}]");
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn test_mixed_nesting_depth() {
        let too_deep = format!(
            "{}1{}",
            r#"{"k": ["#.repeat(11),
            "]}".repeat(11)
        );
        assert!(matches!(parse(&too_deep), Err(Error::DepthExceeded { .. })));
    }

    #[test]
    fn test_custom_depth_ceiling() {
        let opts = Options {
            max_depth: 2,
            container_root: false,
        };
        assert!(parse_opts("[[1]]", opts).is_ok());
        assert!(matches!(
            parse_opts("[[[1]]]", opts),
            Err(Error::DepthExceeded { depth: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_error_lines_point_at_failure() {
        let err = parse("{\n  \"a\": 1,\n  \"b\" 2\n}").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_large_flat_array_stays_shallow() {
        let body: Vec<String> = (0..10_000).map(|i| i.to_string()).collect();
        let input = format!("[{}]", body.join(","));
        let value = parse(&input).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 10_000);
        assert_eq!(items[9_999], Value::Integer(9_999));
    }
}
