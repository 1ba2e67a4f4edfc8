use glam::Vec2;
use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::color::Color;
use crate::primitives::Inset;
use crate::serial;

/// The value kinds a canvas parameter can carry, exposed to editor tooling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    Number,
    String,
    Color,
    Vec2,
    Inset,
}

impl ParamType {
    pub const ALL: [ParamType; 6] = [
        ParamType::Bool,
        ParamType::Number,
        ParamType::String,
        ParamType::Color,
        ParamType::Vec2,
        ParamType::Inset,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ParamType::Bool => "Bool",
            ParamType::Number => "Number",
            ParamType::String => "String",
            ParamType::Color => "Color",
            ParamType::Vec2 => "Vec2",
            ParamType::Inset => "Inset",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == s)
    }
}

/// A typed parameter value
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    String(String),
    Color(Color),
    Vec2(Vec2),
    Inset(Inset),
}

impl ParamValue {
    pub const fn ty(&self) -> ParamType {
        match self {
            ParamValue::Bool(_) => ParamType::Bool,
            ParamValue::Number(_) => ParamType::Number,
            ParamValue::String(_) => ParamType::String,
            ParamValue::Color(_) => ParamType::Color,
            ParamValue::Vec2(_) => ParamType::Vec2,
            ParamValue::Inset(_) => ParamType::Inset,
        }
    }

    /// String form shown by generic editors
    pub fn to_display_string(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::String(s) => s.clone(),
            ParamValue::Color(c) => c.to_hex(),
            ParamValue::Vec2(v) => format!("{}, {}", v.x, v.y),
            ParamValue::Inset(i) => format!("{}, {}, {}, {}", i.left, i.right, i.top, i.bottom),
        }
    }

    /// Parse the editor string form back into a value of the given type
    pub fn parse_for_type(ty: ParamType, s: &str) -> Option<Self> {
        let s = s.trim();
        match ty {
            ParamType::Bool => match s {
                "true" => Some(ParamValue::Bool(true)),
                "false" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            ParamType::Number => s.parse::<f64>().ok().map(ParamValue::Number),
            ParamType::String => Some(ParamValue::String(s.to_owned())),
            ParamType::Color => Color::parse_hex(s).map(ParamValue::Color),
            ParamType::Vec2 => {
                let [x, y] = parse_components::<2>(s)?;
                Some(ParamValue::Vec2(Vec2::new(x, y)))
            }
            ParamType::Inset => {
                let [left, right, top, bottom] = parse_components::<4>(s)?;
                Some(ParamValue::Inset(Inset::lrtb(left, right, top, bottom)))
            }
        }
    }

    pub fn to_value(&self) -> Value {
        let value = match self {
            ParamValue::Bool(b) => json!(b),
            ParamValue::Number(n) => json!(n),
            ParamValue::String(s) => json!(s),
            ParamValue::Color(c) => json!(c.to_hex()),
            ParamValue::Vec2(v) => serial::vec2_to_value(*v),
            ParamValue::Inset(i) => serial::inset_to_value(*i),
        };
        json!({"type": self.ty().as_str(), "value": value})
    }

    /// Deserialize a tagged parameter value; an unreadable document yields
    /// `None` with a warning (the entry is dropped, not fabricated).
    pub fn from_value(doc: &Value) -> Option<Self> {
        let ty = serial::str_field(doc, "type").and_then(ParamType::parse);
        let Some(ty) = ty else {
            log::warn!("parameter document has no valid type tag: {doc}");
            return None;
        };
        let value = doc.get("value").unwrap_or(&Value::Null);
        let parsed = match ty {
            ParamType::Bool => value.as_bool().map(ParamValue::Bool),
            ParamType::Number => value.as_f64().map(ParamValue::Number),
            ParamType::String => value.as_str().map(|s| ParamValue::String(s.to_owned())),
            ParamType::Color => value
                .as_str()
                .and_then(Color::parse_hex)
                .map(ParamValue::Color),
            ParamType::Vec2 => Some(ParamValue::Vec2(serial::vec2_field(
                doc,
                "value",
                Vec2::ZERO,
            ))),
            ParamType::Inset => Some(ParamValue::Inset(serial::inset_field(
                doc,
                "value",
                Inset::zero(),
            ))),
        };
        if parsed.is_none() {
            log::warn!("parameter value does not match its {} tag: {doc}", ty.as_str());
        }
        parsed
    }
}

fn parse_components<const N: usize>(s: &str) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    let mut parts = s.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse::<f32>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<Color> for ParamValue {
    fn from(v: Color) -> Self {
        ParamValue::Color(v)
    }
}

impl From<Vec2> for ParamValue {
    fn from(v: Vec2) -> Self {
        ParamValue::Vec2(v)
    }
}

impl From<Inset> for ParamValue {
    fn from(v: Inset) -> Self {
        ParamValue::Inset(v)
    }
}

/// Conversion from a parameter value into a concrete Rust type.
///
/// Numeric targets read the `Number` variant with widening or narrowing as
/// needed; unsigned targets clamp negative numbers to zero. Every other
/// conversion requires the exact variant.
pub trait FromParam: Sized {
    fn from_param(value: &ParamValue) -> Option<Self>;
}

impl FromParam for bool {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromParam for f64 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromParam for f32 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        f64::from_param(value).map(|n| n as f32)
    }
}

impl FromParam for i32 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        f64::from_param(value).map(|n| n as i32)
    }
}

impl FromParam for i64 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        f64::from_param(value).map(|n| n as i64)
    }
}

impl FromParam for u32 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        f64::from_param(value).map(|n| n.max(0.0) as u32)
    }
}

impl FromParam for u64 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        f64::from_param(value).map(|n| n.max(0.0) as u64)
    }
}

impl FromParam for String {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromParam for Color {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromParam for Vec2 {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromParam for Inset {
    fn from_param(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Inset(i) => Some(*i),
            _ => None,
        }
    }
}

/// Named parameters scoped to one canvas.
///
/// Insertion-ordered so editor listings and serialized output are
/// deterministic. Reads never fail: typed access returns a caller-supplied
/// fallback on a missing name or a type mismatch.
#[derive(Debug, Default)]
pub struct ParamTable {
    entries: IndexMap<String, ParamValue>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// Remove a parameter. Properties referencing it keep their reference;
    /// see `Canvas::remove_invalid_param_refs` for the cleanup sweep.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.entries.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Typed read with fallback: returns `fallback` when the name is missing
    /// or the stored value cannot convert to `T`.
    pub fn value_or<T: FromParam>(&self, name: &str, fallback: T) -> T {
        self.get(name).and_then(T::from_param).unwrap_or(fallback)
    }
}
