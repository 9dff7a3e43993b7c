use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::mode::PracticeMode;
use crate::session::surface::GapPolicy;

pub const LOCALES: &[&str] = &["en", "zh-CN"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_mode")]
    pub default_mode: PracticeMode,
    #[serde(default)]
    pub gap_policy: GapPolicy,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    /// Program to run instead of the auto-detected synthesizer.
    #[serde(default)]
    pub speech_command: Option<String>,
    /// Overrides the sentence bank's language tag for speech.
    #[serde(default)]
    pub speech_language: Option<String>,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_mode() -> PracticeMode {
    PracticeMode::Click
}
fn default_speech_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            default_mode: default_mode(),
            gap_policy: GapPolicy::default(),
            speech_enabled: default_speech_enabled(),
            speech_command: None,
            speech_language: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate(LOCALES);
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sentdrill")
    }

    /// Reset values that would otherwise break startup.
    pub fn validate(&mut self, locales: &[&str]) {
        if let Some(found) = locales
            .iter()
            .find(|l| l.eq_ignore_ascii_case(self.locale.trim()))
        {
            self.locale = found.to_string();
        } else {
            self.locale = default_locale();
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
        for field in [&mut self.speech_command, &mut self.speech_language] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }
}
