// SYNOID Reel Audio Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

/// An audio track (MP3, WAV or any common format). Placed on a movie it
/// spans every scene, which is the usual way to add background music.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub src: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub comment: Option<String>,
    pub condition: Option<String>,
    #[serde(default = "fields::natural")]
    pub duration: ClipDuration,
    #[serde(default)]
    pub extra_time: f64,
    pub fade_in: Option<f64>,
    pub fade_out: Option<f64>,
    pub id: Option<String>,
    #[serde(rename = "loop", default = "fields::once", deserialize_with = "fields::whole_number")]
    pub loops: i64,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub seek: f64,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default = "fields::unity")]
    pub volume: f64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub z_index: i64,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Audio {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            cache: true,
            comment: None,
            condition: None,
            duration: ClipDuration::Natural,
            extra_time: 0.0,
            fade_in: None,
            fade_out: None,
            id: None,
            loops: 1,
            muted: false,
            seek: 0.0,
            start: 0.0,
            variables: Variables::new(),
            volume: 1.0,
            z_index: 0,
            extra: Dict::new(),
        }
    }
}

impl ElementRecord for Audio {
    const TYPE: &'static str = "audio";
}

setters! {
    Audio {
        set_src => src: String,
        set_cache => cache: bool,
        set_duration => duration: ClipDuration,
        set_extra_time => extra_time: f64,
        set_loop => loops: i64,
        set_muted => muted: bool,
        set_seek => seek: f64,
        set_start => start: f64,
        set_variables => variables: Variables,
        set_volume => volume: f64,
        set_z_index => z_index: i64,
    }
    optional {
        set_comment => comment: String,
        set_condition => condition: String,
        set_fade_in => fade_in: f64,
        set_fade_out => fade_out: f64,
        set_id => id: String,
    }
}

variable_setter!(Audio);
