//! Parsed JSON values.
//!
//! Numbers use syntactic typing - the lexical form determines the type,
//! not value sniffing. A literal with no fraction and no exponent stays
//! an [`Value::Integer`]; anything else is a [`Value::Float`].

use indexmap::IndexMap;

/// A parsed JSON value.
///
/// Objects preserve source order. A key repeated in the source keeps
/// the first occurrence's position and the last occurrence's value;
/// that is a documented policy, not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Literal `null`.
    #[default]
    Null,

    /// Literal `true` or `false`.
    Bool(bool),

    /// Number written without a fraction or exponent: `42`, `-17`, `0`.
    Integer(i64),

    /// Number written with a fraction or exponent: `3.14`, `1e2`.
    Float(f64),

    /// Quoted string, escapes fully resolved.
    String(String),

    /// Ordered sequence of values.
    Array(Vec<Value>),

    /// Insertion-ordered mapping from string keys to values.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Check if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a number of either lexical class.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Try to get as boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as object map.
    #[inline]
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an object member by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Look up an array element by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }
}
