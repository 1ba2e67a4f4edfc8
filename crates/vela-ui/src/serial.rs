//! Shared field readers for generic key-value documents.
//!
//! Malformed serialized data degrades gracefully: every reader falls back to
//! the caller's default, field by field, and logs a warning when a field is
//! present but has the wrong shape. Nothing here is fatal.

use glam::Vec2;
use serde_json::{json, Value};

use crate::primitives::Inset;

pub(crate) fn f32_field(doc: &Value, key: &str, default: f32) -> f32 {
    match doc.get(key) {
        None => default,
        Some(v) => match v.as_f64() {
            Some(n) => n as f32,
            None => {
                log::warn!("field `{key}` is not a number ({v}), using {default}");
                default
            }
        },
    }
}

pub(crate) fn opt_f32_field(doc: &Value, key: &str) -> Option<f32> {
    doc.get(key).and_then(Value::as_f64).map(|n| n as f32)
}

pub(crate) fn str_field<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

/// Read a string field and parse it into an enum-like value.
pub(crate) fn parse_str_field<T>(
    doc: &Value,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> T {
    match doc.get(key) {
        None => default,
        Some(v) => match v.as_str().and_then(&parse) {
            Some(t) => t,
            None => {
                log::warn!("field `{key}` has no valid value ({v}), using default");
                default
            }
        },
    }
}

/// Read a `[x, y]` pair.
pub(crate) fn vec2_field(doc: &Value, key: &str, default: Vec2) -> Vec2 {
    match doc.get(key) {
        None => default,
        Some(Value::Array(items)) if items.len() == 2 => {
            let x = items[0].as_f64().map(|n| n as f32).unwrap_or(default.x);
            let y = items[1].as_f64().map(|n| n as f32).unwrap_or(default.y);
            Vec2::new(x, y)
        }
        Some(v) => {
            log::warn!("field `{key}` is not an [x, y] pair ({v}), using default");
            default
        }
    }
}

pub(crate) fn vec2_to_value(v: Vec2) -> Value {
    json!([v.x, v.y])
}

/// Read a `{left, right, top, bottom}` object, each side defaulting
/// independently.
pub(crate) fn inset_field(doc: &Value, key: &str, default: Inset) -> Inset {
    match doc.get(key) {
        None => default,
        Some(v @ Value::Object(_)) => Inset::lrtb(
            f32_field(v, "left", default.left),
            f32_field(v, "right", default.right),
            f32_field(v, "top", default.top),
            f32_field(v, "bottom", default.bottom),
        ),
        Some(v) => {
            log::warn!("field `{key}` is not an inset object ({v}), using default");
            default
        }
    }
}

pub(crate) fn inset_to_value(inset: Inset) -> Value {
    json!({
        "left": inset.left,
        "right": inset.right,
        "top": inset.top,
        "bottom": inset.bottom,
    })
}
