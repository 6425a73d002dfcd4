// SYNOID Reel Subtitles Element
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use super::fields::{setters, Dict};
use super::ElementRecord;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "auto".to_string()
}

/// Subtitle track. Without `captions` the renderer transcribes the movie's
/// audio itself using `model`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitles {
    /// SRT/VTT/ASS content or a URL to it.
    pub captions: Option<String>,
    pub comment: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub model: Option<String>,
    pub settings: Option<Dict>,
    /// Keys this model does not know, written back unchanged.
    #[serde(flatten)]
    pub extra: Dict,
}

impl Subtitles {
    pub fn new() -> Self {
        Self {
            captions: None,
            comment: None,
            language: default_language(),
            model: None,
            settings: None,
            extra: Dict::new(),
        }
    }
}

impl Default for Subtitles {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRecord for Subtitles {
    const TYPE: &'static str = "subtitles";
}

setters! {
    Subtitles {
        set_language => language: String,
    }
    optional {
        set_captions => captions: String,
        set_comment => comment: String,
        set_model => model: String,
        set_settings => settings: Dict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_key_present() {
        let map = Subtitles::new().to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["type", "captions", "comment", "language", "model", "settings"]
        );
        assert_eq!(map["language"], json!("auto"));
    }
}
