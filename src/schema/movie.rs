// SYNOID Reel Movie
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, plain_map, setters, variable_setter, Dict, Variables};
use super::{Element, ModelError, Scene};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_resolution() -> String {
    "custom".to_string()
}

fn default_width() -> i64 {
    640
}

fn default_height() -> i64 {
    360
}

fn default_quality() -> String {
    "high".to_string()
}

/// Top-level render request: ordered scenes, movie-wide elements and the
/// output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Preset name; `width`/`height` only apply to `custom`.
    #[serde(default = "default_resolution")]
    pub resolution: String,
    #[serde(default = "default_width", deserialize_with = "fields::whole_number")]
    pub width: i64,
    #[serde(default = "default_height", deserialize_with = "fields::whole_number")]
    pub height: i64,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub comment: Option<String>,
    /// Watermarked output, billed at the lower draft rate.
    #[serde(default = "fields::yes")]
    pub draft: bool,
    /// Elements spanning every scene (background music, logos).
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub exports: Vec<Dict>,
    /// Assigned by the renderer once the job exists.
    pub id: Option<String>,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default)]
    pub variables: Variables,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Movie {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            resolution: default_resolution(),
            width: default_width(),
            height: default_height(),
            cache: true,
            comment: None,
            draft: true,
            elements: Vec::new(),
            exports: Vec::new(),
            id: None,
            quality: default_quality(),
            variables: Variables::new(),
            extra: Dict::new(),
        }
    }

    pub fn add_scene(&mut self, scene: Scene) -> &mut Self {
        self.scenes.push(scene);
        self
    }

    /// Append a movie-wide element, independent of any scene.
    pub fn add_element(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn add_export(&mut self, export: Dict) -> &mut Self {
        self.exports.push(export);
        self
    }

    pub fn scenes_to_maps(&self) -> Vec<Value> {
        self.scenes
            .iter()
            .map(|s| Value::Object(s.to_map()))
            .collect()
    }

    pub fn elements_to_maps(&self) -> Vec<Value> {
        self.elements
            .iter()
            .map(|e| Value::Object(e.to_map()))
            .collect()
    }

    pub fn to_map(&self) -> Map<String, Value> {
        plain_map(self)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(map)).map_err(|source| ModelError::Fields {
            record: "movie",
            source,
        })
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(ModelError::NotAnObject),
        }
    }

    /// Total of the scene durations that are given in seconds. Scenes sized
    /// by a sentinel are left out since only the renderer knows their length.
    pub fn known_duration(&self) -> f64 {
        self.scenes
            .iter()
            .filter_map(|s| s.duration.seconds())
            .sum()
    }
}

impl Default for Movie {
    fn default() -> Self {
        Self::new()
    }
}

setters! {
    Movie {
        set_resolution => resolution: String,
        set_width => width: i64,
        set_height => height: i64,
        set_cache => cache: bool,
        set_draft => draft: bool,
        set_quality => quality: String,
        set_variables => variables: Variables,
    }
    optional {
        set_comment => comment: String,
        set_id => id: String,
    }
}

variable_setter!(Movie);
