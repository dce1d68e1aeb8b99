use std::env;

use serde::{Deserialize, Serialize};

use self::layout::LayoutConfig;
use self::translator::TranslatorConfig;
use self::trigger::TriggerConfig;

pub mod layout;
pub mod translator;
pub mod trigger;

fn default_enabled() -> bool {
    false
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Master switch; when off, page input is ignored
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub trigger: TriggerConfig,
    pub layout: LayoutConfig,
    pub translator: TranslatorConfig,
    /// Capacity of the worker's request and response queues
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            trigger: TriggerConfig::default(),
            layout: LayoutConfig::default(),
            translator: TranslatorConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay `ITF_*` environment variables onto this config
    pub fn apply_env(&mut self) {
        if let Some(enabled) = env::var("ITF_ENABLED").ok().and_then(|v| parse_flag(&v)) {
            self.enabled = enabled;
        }

        if let Ok(key) = env::var("ITF_API_KEY") {
            self.translator.api_key = key;
        }

        if let Ok(url) = env::var("ITF_API_URL") {
            self.translator.api_url = url;
        }

        if let Ok(lang) = env::var("ITF_TARGET_LANG") {
            self.translator.target_lang = lang;
        }

        if let Some(ttl) = env::var("ITF_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.translator.cache_ttl_secs = ttl;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::TriggerMode;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "enabled": true, "layout": { "gap": 8.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.enabled);
        assert_eq!(config.layout.gap, 8.0);
        assert_eq!(config.layout.top_offset, 20.0);
        assert_eq!(config.layout.exit_delay_ms, 300);
        assert_eq!(config.trigger.mode, TriggerMode::Hover);
        assert_eq!(config.translator.model, "deepseek-chat");
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
