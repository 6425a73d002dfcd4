// SYNOID Reel Video Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

/// A video clip (MP4 recommended; MKV and MOV also render).
///
/// Carries the full visual field set of [`super::Image`] plus the playback
/// controls shared with [`super::Audio`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub src: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    pub chroma_key: Option<Dict>,
    pub comment: Option<String>,
    pub condition: Option<String>,
    pub correction: Option<Dict>,
    pub crop: Option<Dict>,
    #[serde(default = "fields::natural")]
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
    /// Number of times the clip plays.
    #[serde(rename = "loop", default = "fields::once", deserialize_with = "fields::whole_number")]
    pub loops: i64,
    pub mask: Option<String>,
    #[serde(default)]
    pub muted: bool,
    pub pan: Option<String>,
    #[serde(default = "fields::yes")]
    pub pan_crop: bool,
    #[serde(default = "fields::pan_distance")]
    pub pan_distance: f64,
    #[serde(default = "fields::custom_position")]
    pub position: String,
    pub rotate: Option<Dict>,
    pub scale: Option<Dict>,
    /// Offset into the source asset, in seconds.
    #[serde(default)]
    pub seek: f64,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub variables: Variables,
    /// Audio gain.
    #[serde(default = "fields::unity")]
    pub volume: f64,
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

impl Video {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            cache: true,
            chroma_key: None,
            comment: None,
            condition: None,
            correction: None,
            crop: None,
            duration: ClipDuration::Natural,
            extra_time: 0.0,
            fade_in: None,
            fade_out: None,
            flip_horizontal: false,
            flip_vertical: false,
            height: -1,
            id: None,
            loops: 1,
            mask: None,
            muted: false,
            pan: None,
            pan_crop: true,
            pan_distance: 0.1,
            position: fields::custom_position(),
            rotate: None,
            scale: None,
            seek: 0.0,
            start: 0.0,
            variables: Variables::new(),
            volume: 1.0,
            width: -1,
            x: 0,
            y: 0,
            z_index: 0,
            zoom: 0,
            extra: Dict::new(),
        }
    }
}

impl ElementRecord for Video {
    const TYPE: &'static str = "video";
}

setters! {
    Video {
        set_src => src: String,
        set_cache => cache: bool,
        set_duration => duration: ClipDuration,
        set_extra_time => extra_time: f64,
        set_flip_horizontal => flip_horizontal: bool,
        set_flip_vertical => flip_vertical: bool,
        set_height => height: i64,
        set_loop => loops: i64,
        set_muted => muted: bool,
        set_pan_crop => pan_crop: bool,
        set_pan_distance => pan_distance: f64,
        set_position => position: String,
        set_seek => seek: f64,
        set_start => start: f64,
        set_variables => variables: Variables,
        set_volume => volume: f64,
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
    }
}

variable_setter!(Video);
