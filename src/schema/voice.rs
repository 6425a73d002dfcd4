// SYNOID Reel Voice Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

/// A generated voice line. `voice`, `model` and `connection` select the
/// text-to-speech provider; the renderer resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub text: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub comment: Option<String>,
    pub condition: Option<String>,
    /// Id of a stored provider connection (own API key on the provider side).
    pub connection: Option<String>,
    #[serde(default = "fields::natural")]
    pub duration: ClipDuration,
    #[serde(default)]
    pub extra_time: f64,
    pub fade_in: Option<f64>,
    pub fade_out: Option<f64>,
    pub id: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub variables: Variables,
    pub voice: Option<String>,
    #[serde(default = "fields::unity")]
    pub volume: f64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub z_index: i64,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Voice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cache: true,
            comment: None,
            condition: None,
            connection: None,
            duration: ClipDuration::Natural,
            extra_time: 0.0,
            fade_in: None,
            fade_out: None,
            id: None,
            model: None,
            muted: false,
            start: 0.0,
            variables: Variables::new(),
            voice: None,
            volume: 1.0,
            z_index: 0,
            extra: Dict::new(),
        }
    }
}

impl ElementRecord for Voice {
    const TYPE: &'static str = "voice";
}

setters! {
    Voice {
        set_text => text: String,
        set_cache => cache: bool,
        set_duration => duration: ClipDuration,
        set_extra_time => extra_time: f64,
        set_muted => muted: bool,
        set_start => start: f64,
        set_variables => variables: Variables,
        set_volume => volume: f64,
        set_z_index => z_index: i64,
    }
    optional {
        set_comment => comment: String,
        set_condition => condition: String,
        set_connection => connection: String,
        set_fade_in => fade_in: f64,
        set_fade_out => fade_out: f64,
        set_id => id: String,
        set_model => model: String,
        set_voice => voice: String,
    }
}

variable_setter!(Voice);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_fields_default_to_null() {
        let map = Voice::new("Hello there").to_map();
        assert_eq!(map["type"], json!("voice"));
        assert_eq!(map["text"], json!("Hello there"));
        assert_eq!(map["voice"], json!(null));
        assert_eq!(map["model"], json!(null));
        assert_eq!(map["connection"], json!(null));
        assert_eq!(map["volume"], json!(1.0));
    }

    #[test]
    fn test_provider_selection_round_trips() {
        let mut voice = Voice::new("Bonjour");
        voice
            .set_voice("fr-FR-DeniseNeural")
            .set_model("azure")
            .set_connection("conn-1")
            .set_muted(true);
        let loaded = Voice::from_map(voice.to_map()).unwrap();
        assert_eq!(loaded, voice);
    }

    #[test]
    fn test_text_is_required() {
        assert!(Voice::from_map(fields::dict(json!({"voice": "en-US-JennyNeural"}))).is_err());
    }
}
