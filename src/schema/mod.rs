// SYNOID Reel Movie Schema
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// In-memory model of a JSON2Video render request: a Movie owns ordered
// Scenes and global Elements, a Scene owns ordered Elements. Every record
// turns into a key-ordered JSON map with every documented key present
// (null when unset), which is what the renderer expects.

pub mod fields;

mod audio;
mod audiogram;
mod html;
mod image;
mod movie;
mod scene;
mod subtitles;
mod text;
mod video;
mod voice;

pub use audio::Audio;
pub use audiogram::Audiogram;
pub use fields::{dict, ClipDuration, Dict, Variables};
pub use html::Html;
pub use image::Image;
pub use movie::Movie;
pub use scene::Scene;
pub use subtitles::Subtitles;
pub use text::Text;
pub use video::Video;
pub use voice::Voice;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Errors raised while loading the model from a JSON document.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("element has no \"type\" discriminant")]
    MissingType,

    #[error("unknown element type \"{0}\"")]
    UnknownType(String),

    #[error("expected a \"{expected}\" element, found \"{found}\"")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("malformed {record} fields: {source}")]
    Fields {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A flat element record with a fixed discriminant.
///
/// The discriminant is not a field: it lives in [`ElementRecord::TYPE`] and
/// is written as the first key of [`ElementRecord::to_map`], so it cannot be
/// changed after construction.
pub trait ElementRecord: Serialize + DeserializeOwned {
    const TYPE: &'static str;

    /// Every field of the record under its wire name, `type` first.
    fn to_map(&self) -> Map<String, Value> {
        fields::tagged_map(Self::TYPE, self)
    }

    /// Rebuild the record from a map. A `type` key, when present, must match.
    /// Keys the record does not declare end up in its `extra` map.
    fn from_map(mut map: Map<String, Value>) -> Result<Self, ModelError> {
        if let Some(found) = map.remove("type") {
            let found = found.as_str().unwrap_or_default().to_string();
            if found != Self::TYPE {
                return Err(ModelError::TypeMismatch {
                    expected: Self::TYPE,
                    found,
                });
            }
        }
        serde_json::from_value(Value::Object(map)).map_err(|source| ModelError::Fields {
            record: Self::TYPE,
            source,
        })
    }
}

/// Any renderable unit that can sit in a [`Scene`] or directly on a [`Movie`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Audio(Audio),
    Audiogram(Audiogram),
    Html(Html),
    Image(Image),
    Text(Text),
    Video(Video),
    Voice(Voice),
    Subtitles(Subtitles),
}

impl Element {
    /// The `type` discriminant the renderer dispatches on.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Audio(_) => Audio::TYPE,
            Element::Audiogram(_) => Audiogram::TYPE,
            Element::Html(_) => Html::TYPE,
            Element::Image(_) => Image::TYPE,
            Element::Text(_) => Text::TYPE,
            Element::Video(_) => Video::TYPE,
            Element::Voice(_) => Voice::TYPE,
            Element::Subtitles(_) => Subtitles::TYPE,
        }
    }

    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            Element::Audio(e) => e.to_map(),
            Element::Audiogram(e) => e.to_map(),
            Element::Html(e) => e.to_map(),
            Element::Image(e) => e.to_map(),
            Element::Text(e) => e.to_map(),
            Element::Video(e) => e.to_map(),
            Element::Voice(e) => e.to_map(),
            Element::Subtitles(e) => e.to_map(),
        }
    }

    /// Pick the variant from the map's `type` key and load its fields.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingType)?
            .to_string();

        if kind == Audio::TYPE {
            Audio::from_map(map).map(Element::Audio)
        } else if kind == Audiogram::TYPE {
            Audiogram::from_map(map).map(Element::Audiogram)
        } else if kind == Html::TYPE {
            Html::from_map(map).map(Element::Html)
        } else if kind == Image::TYPE {
            Image::from_map(map).map(Element::Image)
        } else if kind == Text::TYPE {
            Text::from_map(map).map(Element::Text)
        } else if kind == Video::TYPE {
            Video::from_map(map).map(Element::Video)
        } else if kind == Voice::TYPE {
            Voice::from_map(map).map(Element::Voice)
        } else if kind == Subtitles::TYPE {
            Subtitles::from_map(map).map(Element::Subtitles)
        } else {
            Err(ModelError::UnknownType(kind))
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(ModelError::NotAnObject),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Element::from_map(map).map_err(D::Error::custom)
    }
}

macro_rules! element_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Element {
                fn from(record: $variant) -> Self {
                    Element::$variant(record)
                }
            }
        )*
    };
}

element_from!(Audio, Audiogram, Html, Image, Text, Video, Voice, Subtitles);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_on_type() {
        let element = Element::from_value(json!({"type": "voice", "text": "hi"})).unwrap();
        assert_eq!(element.kind(), "voice");
        assert!(matches!(element, Element::Voice(ref v) if v.text == "hi"));
    }

    #[test]
    fn test_missing_and_unknown_type() {
        assert!(matches!(
            Element::from_value(json!({"src": "a.png"})),
            Err(ModelError::MissingType)
        ));
        assert!(matches!(
            Element::from_value(json!({"type": "component"})),
            Err(ModelError::UnknownType(ref t)) if t == "component"
        ));
    }

    #[test]
    fn test_record_rejects_foreign_type() {
        let err = Image::from_map(dict(json!({"type": "video", "src": "a.mp4"}))).unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { expected: "image", .. }));
    }

    #[test]
    fn test_required_field_missing() {
        let err = Element::from_value(json!({"type": "text"})).unwrap_err();
        assert!(matches!(err, ModelError::Fields { record: "text", .. }));
    }
}
