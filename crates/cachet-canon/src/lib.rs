//! Canonical JSON encoding for signable structured objects.
//!
//! Signatures are computed over the bytes this module produces and checked
//! by re-encoding the embedded payload, so two objects with the same keys
//! and values must serialize to byte-identical output no matter how their
//! maps were built up.
//!
//! The encoding contract:
//!
//! - object keys are emitted in ascending lexicographic (byte-wise) order
//!   at every nesting level
//! - array element order is preserved
//! - output is compact: no whitespace between tokens
//! - strings use standard JSON escaping (`\"`, `\\`, `\b`, `\f`, `\n`,
//!   `\r`, `\t`, and `\u00xx` lowercase hex for remaining control
//!   characters; everything else is passed through unescaped)
//! - numbers are formatted by `serde_json::Number`, i.e. integers without
//!   exponent or leading zeros and floats via the shortest `f64`
//!   round-trip representation

use serde::Serialize;
use serde_json::Value;

/// Serialize any `Serialize` type to canonical JSON bytes.
///
/// Fails only if the value cannot be represented as a JSON tree (e.g. a map
/// with non-string keys).
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    Ok(canonical_json(&value).into_bytes())
}

/// Produce the canonical JSON text for a value tree.
///
/// Infallible: a `serde_json::Value` is always representable, and cannot be
/// cyclic.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // serde_json::Map preserves insertion order, so the sort here is
            // what makes the encoding order-invariant.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(value, out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
