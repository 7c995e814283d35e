//! Result values produced by command execution.
//!
//! A [`Value`] is what the engine hands back after a successful command. The
//! engine owns it; clients read it through [`Handle::exec_result`] until the
//! next command replaces it.
//!
//! ## Stringification
//!
//! | Variant | Text form |
//! |---------|-----------|
//! | `Null` | `""` |
//! | `Bool` | `"true"` / `"false"` |
//! | `Int` | decimal |
//! | `Str` | the string itself |
//! | `Array` | JSON array of strings, `null` for missing elements |
//!
//! [`Handle::exec_result`]: crate::Handle::exec_result

use std::fmt;

/// Engine result value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// No value (missing key or field)
    Null,
    /// Boolean outcome
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    Str(String),
    /// Ordered list; `None` marks a missing element
    Array(Vec<Option<String>>),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Integer interpretation of the value.
    ///
    /// Strings are read up to the first non-digit, so `"12abc"` is 12 and
    /// `"abc"` is 0. Booleans are 1/0; null and arrays are 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Bool(b) => i64::from(*b),
            Value::Str(s) => parse_int_prefix(s),
            Value::Null | Value::Array(_) => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                let encoded = serde_json::to_string(items).map_err(|_| fmt::Error)?;
                f.write_str(&encoded)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map_or(Value::Null, Value::Str)
    }
}

/// Lenient integer parse: optional sign followed by leading digits.
///
/// Surrounding whitespace is skipped. Anything unparsable is 0; values out of
/// range saturate.
pub(crate) fn parse_int_prefix(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut acc: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = i64::from(byte - b'0');
        acc = match acc
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
        {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    acc
}
