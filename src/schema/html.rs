// SYNOID Reel HTML Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

fn default_wait() -> f64 {
    2.0
}

/// A web page snapshot. Either `src` (a URL) or `html` (an inline snippet)
/// describes the page; neither is enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
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
    pub html: Option<String>,
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
    pub src: Option<String>,
    #[serde(default)]
    pub start: f64,
    /// Load TailwindCSS into the page before rendering.
    #[serde(default)]
    pub tailwindcss: bool,
    #[serde(default)]
    pub variables: Variables,
    /// Seconds to wait after load before the snapshot is taken.
    #[serde(default = "default_wait")]
    pub wait: f64,
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

impl Html {
    pub fn new() -> Self {
        Self {
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
            html: None,
            id: None,
            mask: None,
            pan: None,
            pan_crop: true,
            pan_distance: 0.1,
            position: fields::custom_position(),
            rotate: None,
            scale: None,
            src: None,
            start: 0.0,
            tailwindcss: false,
            variables: Variables::new(),
            wait: default_wait(),
            width: -1,
            x: 0,
            y: 0,
            z_index: 0,
            zoom: 0,
            extra: Dict::new(),
        }
    }

    /// Page built from an inline snippet.
    pub fn from_snippet(html: impl Into<String>) -> Self {
        let mut element = Self::new();
        element.html = Some(html.into());
        element
    }

    /// Page loaded from a URL.
    pub fn from_url(src: impl Into<String>) -> Self {
        let mut element = Self::new();
        element.src = Some(src.into());
        element
    }
}

impl Default for Html {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRecord for Html {
    const TYPE: &'static str = "html";
}

setters! {
    Html {
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
        set_tailwindcss => tailwindcss: bool,
        set_variables => variables: Variables,
        set_wait => wait: f64,
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
        set_html => html: String,
        set_id => id: String,
        set_mask => mask: String,
        set_pan => pan: String,
        set_rotate => rotate: Dict,
        set_scale => scale: Dict,
        set_src => src: String,
    }
}

variable_setter!(Html);
