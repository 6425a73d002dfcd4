// SYNOID Reel Scene
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, plain_map, setters, variable_setter, ClipDuration, Dict, Variables};
use super::{Element, ModelError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_background() -> String {
    "#000000".to_string()
}

/// A timeline segment. Elements share the scene's time origin and are drawn
/// in the order they were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "fields::natural")]
    pub duration: ClipDuration,
    /// Hex colour or `transparent`.
    #[serde(rename = "background-color", default = "default_background")]
    pub background_color: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub comment: Option<String>,
    /// Evaluated by the renderer; the scene is skipped when false.
    pub condition: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
    pub id: Option<String>,
    pub transition: Option<Dict>,
    #[serde(default)]
    pub variables: Variables,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            duration: ClipDuration::Natural,
            background_color: default_background(),
            cache: true,
            comment: None,
            condition: None,
            elements: Vec::new(),
            id: None,
            transition: None,
            variables: Variables::new(),
            extra: Dict::new(),
        }
    }

    /// Append to the end of the element list.
    pub fn add_element(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
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

    pub fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(map)).map_err(|source| ModelError::Fields {
            record: "scene",
            source,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

setters! {
    Scene {
        set_duration => duration: ClipDuration,
        set_background_color => background_color: String,
        set_cache => cache: bool,
        set_variables => variables: Variables,
    }
    optional {
        set_comment => comment: String,
        set_condition => condition: String,
        set_id => id: String,
        set_transition => transition: Dict,
    }
}

variable_setter!(Scene);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{dict, Image, Text};
    use serde_json::json;

    #[test]
    fn test_background_uses_hyphenated_key() {
        let mut scene = Scene::new();
        scene.set_background_color("transparent");
        let map = scene.to_map();
        assert_eq!(map["background-color"], json!("transparent"));
        assert!(!map.contains_key("background_color"));
    }

    #[test]
    fn test_transition_defaults_to_null() {
        let mut scene = Scene::new();
        assert_eq!(scene.to_map()["transition"], json!(null));
        scene.set_transition(dict(json!({"style": "fade", "duration": 1.5})));
        assert_eq!(scene.to_map()["transition"]["style"], json!("fade"));
    }

    #[test]
    fn test_elements_to_maps_keeps_order() {
        let mut scene = Scene::new();
        scene
            .add_element(Text::new("title"))
            .add_element(Image::new("a.png"));
        let maps = scene.elements_to_maps();
        assert_eq!(maps[0]["type"], json!("text"));
        assert_eq!(maps[1]["type"], json!("image"));
        assert_eq!(Value::Array(maps), scene.to_map()["elements"]);
    }

    #[test]
    fn test_condition_is_opaque() {
        let mut scene = Scene::new();
        scene.set_condition("{{show_intro}} == true");
        assert_eq!(scene.to_map()["condition"], json!("{{show_intro}} == true"));
    }
}
