//! # Blank Values
//!
//! Request validation treats a parameter as missing when it is absent or
//! when its value is "blank". Blank follows the truthiness rule that callers
//! of the Daraja API have historically relied on:
//!
//! | Value | Blank |
//! |-------|-------|
//! | `null` | yes |
//! | `false` | yes |
//! | `0`, `0.0` | yes |
//! | `""`, `"0"` | yes |
//! | `[]`, `{}` | yes |
//! | anything else | no |
//!
//! Whitespace-only strings are *not* blank.

use serde_json::Value;

/// Whether `value` counts as missing for request validation.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
