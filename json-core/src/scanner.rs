//! JSON scanner (lexer).
//!
//! Walks the input once, left to right, producing the complete token
//! sequence terminated by a [`TokenKind::Eof`] sentinel. All lexical
//! validation happens here: string escapes, number grammar, keyword
//! spelling, control characters. Structure is the parser's problem.
//!
//! Plain string segments are located with `memchr` so the common case
//! (no escapes) is a bulk copy between the quote and the next `"`/`\`.

use memchr::memchr2;
use phf::phf_map;

use crate::error::Error;
use crate::token::{Token, TokenKind};

/// Keyword spellings and the tokens they produce.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "true" => TokenKind::Boolean(true),
    "false" => TokenKind::Boolean(false),
    "null" => TokenKind::Null,
};

/// The four whitespace characters JSON permits between tokens.
#[inline]
fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Single-pass lexer over a text buffer.
///
/// Constructed fresh per parse, used once, discarded. Holds a forward
/// byte cursor and the line counter used for diagnostics.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input into a token sequence ending in `Eof`.
    ///
    /// Empty or whitespace-only input fails before any scanning begins.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, Error> {
        if self.input.bytes().all(is_json_whitespace) {
            return Err(Error::EmptyInput);
        }
        while let Some(b) = self.peek() {
            self.scan_token(b)?;
        }
        self.tokens.push(Token::new(TokenKind::Eof, self.line));
        Ok(self.tokens)
    }

    fn scan_token(&mut self, b: u8) -> Result<(), Error> {
        match b {
            b'{' => self.push_single(TokenKind::LBrace),
            b'}' => self.push_single(TokenKind::RBrace),
            b'[' => self.push_single(TokenKind::LBracket),
            b']' => self.push_single(TokenKind::RBracket),
            b',' => self.push_single(TokenKind::Comma),
            b':' => self.push_single(TokenKind::Colon),
            b' ' | b'\t' | b'\r' => self.pos += 1,
            b'\n' => {
                self.pos += 1;
                self.line += 1;
            }
            b'"' => self.scan_string()?,
            b'-' | b'0'..=b'9' => self.scan_number()?,
            _ if b.is_ascii_alphabetic() => self.scan_keyword()?,
            _ => {
                return Err(Error::UnexpectedCharacter {
                    ch: self.current_char(),
                    line: self.line,
                });
            }
        }
        Ok(())
    }

    /// Emit a one-character structural token.
    fn push_single(&mut self, kind: TokenKind) {
        self.pos += 1;
        self.tokens.push(Token::new(kind, self.line));
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Decode the full character at the cursor, for diagnostics only.
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\u{FFFD}')
    }

    /// Scan a quoted string, resolving escapes into the token payload.
    fn scan_string(&mut self) -> Result<(), Error> {
        let line = self.line;
        self.pos += 1; // opening quote
        let mut buf = String::new();

        loop {
            let rest = &self.input.as_bytes()[self.pos..];
            let stop = match memchr2(b'"', b'\\', rest) {
                Some(i) => i,
                None => return Err(Error::UnterminatedString { line }),
            };
            // verbatim segment up to the next quote or escape
            if let Some(offset) = rest[..stop].iter().position(|&b| b < 0x20) {
                return Err(Error::ControlCharacter {
                    code: rest[offset],
                    line,
                });
            }
            buf.push_str(&self.input[self.pos..self.pos + stop]);
            self.pos += stop;

            if rest[stop] == b'"' {
                self.pos += 1;
                break;
            }
            self.pos += 1; // backslash
            self.scan_escape(&mut buf, line)?;
        }

        self.tokens.push(Token::new(TokenKind::String(buf), line));
        Ok(())
    }

    /// Resolve one escape sequence; the backslash is already consumed.
    fn scan_escape(&mut self, buf: &mut String, line: usize) -> Result<(), Error> {
        let b = self.peek().ok_or(Error::UnterminatedString { line })?;
        self.pos += 1;
        match b {
            b'"' => buf.push('"'),
            b'\\' => buf.push('\\'),
            b'/' => buf.push('/'),
            b'b' => buf.push('\u{0008}'),
            b'f' => buf.push('\u{000C}'),
            b'n' => buf.push('\n'),
            b'r' => buf.push('\r'),
            b't' => buf.push('\t'),
            b'u' => {
                let ch = self.scan_unicode_escape(line)?;
                buf.push(ch);
            }
            _ => {
                self.pos -= 1;
                return Err(Error::InvalidEscape {
                    ch: self.current_char(),
                    line,
                });
            }
        }
        Ok(())
    }

    /// Read the four hex digits after `\u` as one UTF-16 code unit.
    ///
    /// A high surrogate must be followed by a `\u` low surrogate; the
    /// pair combines into a single code point. Unpaired surrogates are
    /// lexical errors.
    fn scan_unicode_escape(&mut self, line: usize) -> Result<char, Error> {
        let unit = self.scan_hex4(line)?;

        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(Error::InvalidUnicodeEscape {
                reason: "unpaired low surrogate",
                line,
            });
        }
        if (0xD800..=0xDBFF).contains(&unit) {
            let bytes = self.input.as_bytes();
            if bytes.get(self.pos) != Some(&b'\\') || bytes.get(self.pos + 1) != Some(&b'u') {
                return Err(Error::InvalidUnicodeEscape {
                    reason: "unpaired high surrogate",
                    line,
                });
            }
            self.pos += 2;
            let low = self.scan_hex4(line)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::InvalidUnicodeEscape {
                    reason: "expected low surrogate after high surrogate",
                    line,
                });
            }
            let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or(Error::InvalidUnicodeEscape {
                reason: "invalid code point",
                line,
            });
        }

        char::from_u32(u32::from(unit)).ok_or(Error::InvalidUnicodeEscape {
            reason: "invalid code point",
            line,
        })
    }

    fn scan_hex4(&mut self, line: usize) -> Result<u16, Error> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self.peek().ok_or(Error::UnterminatedString { line })?;
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => {
                    return Err(Error::InvalidUnicodeEscape {
                        reason: "expected four hex digits",
                        line,
                    });
                }
            };
            self.pos += 1;
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    /// Scan a number literal; the raw text is retained in the token for
    /// later numeric decoding by the parser.
    fn scan_number(&mut self) -> Result<(), Error> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        // Integer part: one or more digits, no multi-digit leading zero.
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return self.number_error(start, "leading zero");
                }
            }
            Some(b'1'..=b'9') => self.eat_digits(),
            _ => return self.number_error(start, "expected digit after '-'"),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return self.number_error(start, "expected digit after '.'");
            }
            self.eat_digits();
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return self.number_error(start, "expected digit in exponent");
            }
            self.eat_digits();
        }

        let literal = self.input[start..self.pos].to_string();
        self.tokens.push(Token::new(TokenKind::Number(literal), self.line));
        Ok(())
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    /// Build a malformed-number error naming the literal scanned so far
    /// plus the offending character.
    fn number_error(&self, start: usize, reason: &'static str) -> Result<(), Error> {
        let end = match self.input[self.pos..].chars().next() {
            Some(c) => self.pos + c.len_utf8(),
            None => self.pos,
        };
        Err(Error::MalformedNumber {
            literal: self.input[start..end].to_string(),
            reason,
            line: self.line,
        })
    }

    /// Scan the maximal alphanumeric run and match it against the
    /// keyword table.
    fn scan_keyword(&mut self) -> Result<(), Error> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];
        match KEYWORDS.get(word) {
            Some(kind) => {
                self.tokens.push(Token::new(kind.clone(), self.line));
                Ok(())
            }
            None => Err(Error::UnexpectedKeyword {
                word: word.to_string(),
                line: self.line,
            }),
        }
    }
}
