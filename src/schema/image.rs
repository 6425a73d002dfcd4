// SYNOID Reel Image Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{self, setters, variable_setter, ClipDuration, Dict, Variables};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

/// A still image (JPG, PNG, GIF or any common format) placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// URL of the asset.
    pub src: String,
    #[serde(default = "fields::yes")]
    pub cache: bool,
    /// Colour (or range of colours) turned transparent.
    pub chroma_key: Option<Dict>,
    pub comment: Option<String>,
    /// Expression the renderer evaluates to decide whether to draw the element.
    pub condition: Option<String>,
    /// Contrast, brightness, saturation and gamma adjustments.
    pub correction: Option<Dict>,
    pub crop: Option<Dict>,
    #[serde(default = "fields::natural")]
    pub duration: ClipDuration,
    /// Time span added after playback, in seconds.
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
    /// URL of a PNG or video defining a mask.
    pub mask: Option<String>,
    /// Pan direction.
    pub pan: Option<String>,
    #[serde(default = "fields::yes")]
    pub pan_crop: bool,
    #[serde(default = "fields::pan_distance")]
    pub pan_distance: f64,
    /// Position keyword; `custom` honours `x`/`y`.
    #[serde(default = "fields::custom_position")]
    pub position: String,
    pub rotate: Option<Dict>,
    /// Deprecated by the renderer in favour of `width`/`height`.
    pub scale: Option<Dict>,
    /// Start time relative to the containing scene.
    #[serde(default)]
    pub start: f64,
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
    /// Zoom level in percent.
    #[serde(default, deserialize_with = "fields::whole_number")]
    pub zoom: i64,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Image {
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
            mask: None,
            pan: None,
            pan_crop: true,
            pan_distance: 0.1,
            position: fields::custom_position(),
            rotate: None,
            scale: None,
            start: 0.0,
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

impl ElementRecord for Image {
    const TYPE: &'static str = "image";
}

setters! {
    Image {
        set_src => src: String,
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
    }
}

variable_setter!(Image);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_renderer_expectations() {
        let map = Image::new("https://cdn.example/a.jpg").to_map();
        assert_eq!(map["type"], json!("image"));
        assert_eq!(map["duration"], json!(-1));
        assert_eq!(map["width"], json!(-1));
        assert_eq!(map["position"], json!("custom"));
        assert_eq!(map["pan_distance"], json!(0.1));
        assert_eq!(map["crop"], json!(null));
        assert_eq!(map["variables"], json!({}));
    }

    #[test]
    fn test_negative_sizes_pass_through() {
        let mut image = Image::new("a.png");
        image.set_width(-400).set_height(-3);
        let map = image.to_map();
        assert_eq!(map["width"], json!(-400));
        assert_eq!(map["height"], json!(-3));
    }

    #[test]
    fn test_missing_optional_keys_take_defaults() {
        let image = Image::from_map(fields::dict(json!({"src": "a.png", "zoom": 3}))).unwrap();
        assert_eq!(image.zoom, 3);
        assert!(image.cache);
        assert!(image.pan_crop);
        assert_eq!(image.duration, ClipDuration::Natural);
    }
}
