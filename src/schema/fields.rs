// SYNOID Reel Schema Fields
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Field types, serde defaults and the setter macro shared by every record
// of the movie document.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Template variables. Keys are unique; setting an existing key replaces it.
pub type Variables = Map<String, Value>;

/// Free-form nested object (`crop`, `rotate`, `correction`, `chroma_key`,
/// `transition`, `settings`, `scale`).
pub type Dict = Map<String, Value>;

/// Duration of an element or scene.
///
/// The renderer understands two negative sentinels which are written back
/// exactly as received: `-1` (use the natural length of the source asset)
/// and `-2` (stretch to the containing scene).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClipDuration {
    /// `-1`
    #[default]
    Natural,
    /// `-2`
    Scene,
    Seconds(f64),
}

impl ClipDuration {
    pub const NATURAL: i64 = -1;
    pub const SCENE: i64 = -2;

    pub fn seconds(self) -> Option<f64> {
        match self {
            ClipDuration::Seconds(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for ClipDuration {
    fn from(value: f64) -> Self {
        if value == Self::NATURAL as f64 {
            ClipDuration::Natural
        } else if value == Self::SCENE as f64 {
            ClipDuration::Scene
        } else {
            ClipDuration::Seconds(value)
        }
    }
}

impl From<i64> for ClipDuration {
    fn from(value: i64) -> Self {
        match value {
            Self::NATURAL => ClipDuration::Natural,
            Self::SCENE => ClipDuration::Scene,
            other => ClipDuration::Seconds(other as f64),
        }
    }
}

impl From<i32> for ClipDuration {
    fn from(value: i32) -> Self {
        ClipDuration::from(i64::from(value))
    }
}

impl Serialize for ClipDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClipDuration::Natural => serializer.serialize_i64(Self::NATURAL),
            ClipDuration::Scene => serializer.serialize_i64(Self::SCENE),
            ClipDuration::Seconds(s) => serializer.serialize_f64(*s),
        }
    }
}

struct ClipDurationVisitor;

impl<'de> Visitor<'de> for ClipDurationVisitor {
    type Value = ClipDuration;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a duration in seconds, -1 or -2")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ClipDuration, E> {
        Ok(ClipDuration::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ClipDuration, E> {
        Ok(ClipDuration::Seconds(v as f64))
    }

    // Floats never collapse into a sentinel, so `-1.0` survives a round trip
    // as `-1.0` and the integer `-1` as `-1`.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ClipDuration, E> {
        Ok(ClipDuration::Seconds(v))
    }
}

impl<'de> Deserialize<'de> for ClipDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClipDurationVisitor)
    }
}

/// Turn a `json!` literal into a [`Dict`]. Anything but an object yields an
/// empty map.
pub fn dict(value: Value) -> Dict {
    match value {
        Value::Object(map) => map,
        _ => Dict::new(),
    }
}

/// Serialize a record and put its discriminant in front of its fields. A
/// stray `type` among the record's extra keys never overrides the tag.
pub(crate) fn tagged_map<T: Serialize>(tag: &str, record: &T) -> Map<String, Value> {
    let mut fields = plain_map(record);
    fields.remove("type");

    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(tag));
    map.extend(fields);
    map
}

/// Serialize a record that has no discriminant.
pub(crate) fn plain_map<T: Serialize>(record: &T) -> Map<String, Value> {
    let value = serde_json::to_value(record);
    debug_assert!(
        matches!(value, Ok(Value::Object(_))),
        "records serialize to JSON objects"
    );
    match value {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Integer fields also take whole-valued floats (`1920.0`), which models
/// tend to emit.
pub(crate) fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    as_whole_number(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {}", value)))
}

fn as_whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // Beyond 2^53 floats stop being exact integers.
    (f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0).then_some(f as i64)
}

// serde defaults shared across records

pub(crate) fn yes() -> bool {
    true
}

pub(crate) fn natural() -> ClipDuration {
    ClipDuration::Natural
}

pub(crate) fn scene_length() -> ClipDuration {
    ClipDuration::Scene
}

pub(crate) fn auto_size() -> i64 {
    -1
}

pub(crate) fn custom_position() -> String {
    "custom".to_string()
}

pub(crate) fn pan_distance() -> f64 {
    0.1
}

pub(crate) fn once() -> i64 {
    1
}

pub(crate) fn unity() -> f64 {
    1.0
}

/// Generates `set_*` methods. Plain fields take `impl Into<T>`; optional
/// fields take the inner value and store `Some`. Setters return `&mut Self`
/// so calls chain on a mutable binding.
macro_rules! setters {
    (
        $record:ident {
            $( $setter:ident => $field:ident : $ty:ty ),* $(,)?
        }
        optional {
            $( $osetter:ident => $ofield:ident : $oty:ty ),* $(,)?
        }
    ) => {
        impl $record {
            $(
                pub fn $setter(&mut self, value: impl Into<$ty>) -> &mut Self {
                    self.$field = value.into();
                    self
                }
            )*
            $(
                pub fn $osetter(&mut self, value: impl Into<$oty>) -> &mut Self {
                    self.$ofield = Some(value.into());
                    self
                }
            )*
        }
    };
}

/// Adds `set_variable` (single key, last write wins) to records carrying a
/// `variables` map.
macro_rules! variable_setter {
    ($record:ident) => {
        impl $record {
            pub fn set_variable(
                &mut self,
                key: impl Into<String>,
                value: impl Into<serde_json::Value>,
            ) -> &mut Self {
                self.variables.insert(key.into(), value.into());
                self
            }
        }
    };
}

pub(crate) use setters;
pub(crate) use variable_setter;
