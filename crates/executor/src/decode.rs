//! Result decoding.
//!
//! Pure functions from an engine [`Value`] to host types. Every decoder
//! works from the engine's own coercions:
//!
//! | Decoder | Rule |
//! |---------|------|
//! | [`to_string`] | engine text form |
//! | [`to_int`] | engine integer coercion, malformed text → leading numeric prefix or 0 |
//! | [`to_bool`] | text form is exactly `"true"` |
//! | [`to_array`] | text form parsed as a JSON list of nullable strings, `null` → `""` |

use kvbridge_engine::Value;

use crate::{Error, Result};

/// Decode as text.
pub fn to_string(value: &Value) -> String {
    value.to_string()
}

/// Decode as a signed 64-bit integer.
pub fn to_int(value: &Value) -> i64 {
    value.to_int()
}

/// Decode as a boolean.
///
/// Only the exact text `"true"` is true; `"1"` is false.
pub fn to_bool(value: &Value) -> bool {
    value.to_string() == "true"
}

/// Decode as an ordered list of strings.
pub fn to_array(value: &Value) -> Result<Vec<String>> {
    let text = value.to_string();
    let items: Vec<Option<String>> =
        serde_json::from_str(&text).map_err(|e| Error::Decode {
            reason: format!("expected a JSON list of strings, got '{}': {}", text, e),
        })?;
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// Decode as a list and require exactly `expected` elements.
pub fn to_array_of_len(value: &Value, expected: usize) -> Result<Vec<String>> {
    let items = to_array(value)?;
    if items.len() != expected {
        return Err(Error::Decode {
            reason: format!("expected {} elements, got {}", expected, items.len()),
        });
    }
    Ok(items)
}
