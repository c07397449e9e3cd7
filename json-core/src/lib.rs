//! Strict JSON Parser
//!
//! Two-pass parser for JSON text. The scanner tokenizes the whole input
//! up front, then a recursive descent parser reduces the token sequence
//! to a single [`Value`] tree. The first violation at either stage
//! aborts the parse with a line-numbered [`Error`].
//!
//! # Architecture
//!
//! - **token.rs** - Token and TokenKind, the closed lexical vocabulary
//! - **scanner.rs** - Pass one: bytes to tokens, all lexical validation
//! - **parser.rs** - Pass two: tokens to a value tree, depth enforcement
//! - **value.rs** - The Value tree with ordered objects
//! - **error.rs** - The failure taxonomy shared by both passes
//!
//! # Example
//!
//! ```
//! use json_core::{parse, Value};
//!
//! let doc = parse(r#"{"name": "widget", "count": 3}"#)?;
//! assert_eq!(doc.get("name").and_then(Value::as_str), Some("widget"));
//! assert_eq!(doc.get("count"), Some(&Value::Integer(3)));
//! # Ok::<(), json_core::Error>(())
//! ```

pub mod error;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use error::{Error, ErrorKind};
pub use parser::{Options, Parser, MAX_DEPTH};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
pub use value::Value;

/// Parse a JSON document with the default policy.
///
/// Any value kind is legal at the root and the nesting ceiling is
/// [`MAX_DEPTH`].
pub fn parse(input: &str) -> Result<Value, Error> {
    parse_with_options(input, Options::default())
}

/// Parse a JSON document under an explicit [`Options`] policy.
pub fn parse_with_options(input: &str, options: Options) -> Result<Value, Error> {
    let tokens = Scanner::new(input).scan_tokens()?;
    Parser::with_options(tokens, options).parse_document()
}
