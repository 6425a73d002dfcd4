// SYNOID Reel Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// API keys and endpoints, read once at start-up and handed to each client.

use std::time::Duration;

pub const JSON2VIDEO_BASE_URL: &str = "https://api.json2video.com/v2";
pub const PEXELS_BASE_URL: &str = "https://api.pexels.com";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_UPLOAD_URL: &str = "https://generativelanguage.googleapis.com/upload/v1beta/files";
pub const GEMINI_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// How long to wait for an uploaded file to leave the processing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct StockMediaConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub upload_url: String,
    pub poll: PollPolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub render: RenderConfig,
    pub stock_media: StockMediaConfig,
    pub gemini: GeminiConfig,
}

impl Config {
    /// Read configuration from the process environment. Call
    /// `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let mut poll = PollPolicy::default();
        if let Some(raw) = lookup("REEL_POLL_INTERVAL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "REEL_POLL_INTERVAL_SECS",
                value: raw.clone(),
            })?;
            poll.interval = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("REEL_POLL_MAX_ATTEMPTS") {
            poll.max_attempts = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "REEL_POLL_MAX_ATTEMPTS",
                value: raw.clone(),
            })?;
        }

        Ok(Self {
            render: RenderConfig {
                api_key: required("JSON2VIDEO_API_KEY")?,
                base_url: optional("JSON2VIDEO_BASE_URL", JSON2VIDEO_BASE_URL),
            },
            stock_media: StockMediaConfig {
                api_key: required("PEXELS_API_KEY")?,
                base_url: optional("PEXELS_BASE_URL", PEXELS_BASE_URL),
            },
            gemini: GeminiConfig {
                api_key: required("GEMINI_API_KEY")?,
                model: optional("GEMINI_MODEL", GEMINI_MODEL),
                base_url: optional("GEMINI_BASE_URL", GEMINI_BASE_URL),
                upload_url: optional("GEMINI_UPLOAD_URL", GEMINI_UPLOAD_URL),
                poll,
            },
        })
    }
}

impl RenderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: JSON2VIDEO_BASE_URL.to_string(),
        }
    }
}

impl StockMediaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: PEXELS_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            upload_url: GEMINI_UPLOAD_URL.to_string(),
            poll: PollPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_keys_and_defaults() {
        let vars = env(&[
            ("JSON2VIDEO_API_KEY", "j2v"),
            ("PEXELS_API_KEY", "px"),
            ("GEMINI_API_KEY", "gm"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.render.api_key, "j2v");
        assert_eq!(config.render.base_url, JSON2VIDEO_BASE_URL);
        assert_eq!(config.gemini.model, GEMINI_MODEL);
        assert_eq!(config.gemini.poll, PollPolicy::default());
    }

    #[test]
    fn test_missing_key_is_named() {
        let vars = env(&[("JSON2VIDEO_API_KEY", "j2v"), ("GEMINI_API_KEY", "gm")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PEXELS_API_KEY")));
    }

    #[test]
    fn test_poll_overrides() {
        let vars = env(&[
            ("JSON2VIDEO_API_KEY", "j2v"),
            ("PEXELS_API_KEY", "px"),
            ("GEMINI_API_KEY", "gm"),
            ("REEL_POLL_INTERVAL_SECS", "2"),
            ("REEL_POLL_MAX_ATTEMPTS", "5"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.gemini.poll.interval, Duration::from_secs(2));
        assert_eq!(config.gemini.poll.max_attempts, 5);
    }

    #[test]
    fn test_bad_poll_value() {
        let vars = env(&[
            ("JSON2VIDEO_API_KEY", "j2v"),
            ("PEXELS_API_KEY", "px"),
            ("GEMINI_API_KEY", "gm"),
            ("REEL_POLL_MAX_ATTEMPTS", "lots"),
        ]);
        assert!(matches!(
            Config::from_lookup(|k| vars.get(k).cloned()),
            Err(ConfigError::Invalid { name: "REEL_POLL_MAX_ATTEMPTS", .. })
        ));
    }
}
