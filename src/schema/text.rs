// SYNOID Reel Text Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

fn default_style() -> String {
    "001".to_string()
}

/// A styled text overlay. `style` picks one of the renderer's text
/// presets; `settings` carries the preset's own options (font, colours,
/// alignment) untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub chroma_key: Option<Dict>,
    pub comment: Option<String>,
    pub condition: Option<String>,
    pub correction: Option<Dict>,
    pub crop: Option<Dict>,
    #[serde(default = "fields::scene_length")]
    pub duration: ClipDuration,
    #[serde(default)]
    pub extra_time: f64,
    pub fade_in: Option<f64>,
    pub fade_out: Option<f64>,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
    #[serde(default = "fields::auto_size", deserialize_with = "fields::whole_number")]
    pub height: i64,
    pub id: Option<String>,
    pub mask: Option<String>,
    pub pan: Option<String>,
    #[serde(default = "fields::yes")]
    pub pan_crop: bool,
    #[serde(default = "fields::pan_distance")]
    pub pan_distance: f64,
    #[serde(default = "fields::custom_position")]
    pub position: String,
    pub rotate: Option<Dict>,
    pub scale: Option<Dict>,
    pub settings: Option<Dict>,
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default = "fields::auto_size", deserialize_with = "fields::whole_number")]
    pub width: i64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub x: i64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub y: i64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub z_index: i64,
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub zoom: i64,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cache: true,
            chroma_key: None,
            comment: None,
            condition: None,
            correction: None,
            crop: None,
            duration: ClipDuration::Scene,
            extra_time: 0.0,
            fade_in: None,
            fade_out: None,
            flip_horizontal: false,
            flip_vertical: false,
            height: -1,
            id: None,
            mask: None,
            pan: None,
            pan_crop: true,
            pan_distance: 0.1,
            position: fields::custom_position(),
            rotate: None,
            scale: None,
            settings: None,
            start: 0.0,
            style: default_style(),
            variables: Variables::new(),
            width: -1,
            x: 0,
            y: 0,
            z_index: 0,
            zoom: 0,
            extra: Dict::new(),
        }
    }
}

impl ElementRecord for Text {
    const TYPE: &'static str = "text";
}

setters! {
    Text {
        set_text => text: String,
        set_cache => cache: bool,
        set_duration => duration: ClipDuration,
        set_extra_time => extra_time: f64,
        set_flip_horizontal => flip_horizontal: bool,
        set_flip_vertical => flip_vertical: bool,
        set_height => height: i64,
        set_pan_crop => pan_crop: bool,
        set_pan_distance => pan_distance: f64,
        set_position => position: String,
        set_start => start: f64,
        set_style => style: String,
        set_variables => variables: Variables,
        set_width => width: i64,
        set_x => x: i64,
        set_y => y: i64,
        set_z_index => z_index: i64,
        set_zoom => zoom: i64,
    }
    optional {
        set_chroma_key => chroma_key: Dict,
        set_comment => comment: String,
        set_condition => condition: String,
        set_correction => correction: Dict,
        set_crop => crop: Dict,
        set_fade_in => fade_in: f64,
        set_fade_out => fade_out: f64,
        set_id => id: String,
        set_mask => mask: String,
        set_pan => pan: String,
        set_rotate => rotate: Dict,
        set_scale => scale: Dict,
        set_settings => settings: Dict,
    }
}

variable_setter!(Text);
