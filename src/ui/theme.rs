use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub accent: String,
    pub muted: String,
    pub header_bg: String,
    pub header_fg: String,
    pub border: String,
    pub token_fg: String,
    pub token_bg: String,
    pub token_used: String,
    pub token_cursor_fg: String,
    pub token_cursor_bg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub success: String,
    pub error: String,
    pub warning: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones
        let user_theme_path = Config::config_dir()
            .join("themes")
            .join(format!("{name}.toml"));
        if let Ok(content) = fs::read_to_string(&user_theme_path)
            && let Ok(theme) = toml::from_str::<Theme>(&content)
        {
            return Some(theme);
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("terminal-default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "reset".to_string(),
            fg: "reset".to_string(),
            accent: "#5f87ff".to_string(),
            muted: "#808080".to_string(),
            header_bg: "#303030".to_string(),
            header_fg: "#e4e4e4".to_string(),
            border: "#585858".to_string(),
            token_fg: "#e4e4e4".to_string(),
            token_bg: "#3a3a3a".to_string(),
            token_used: "#585858".to_string(),
            token_cursor_fg: "#000000".to_string(),
            token_cursor_bg: "#ffaf00".to_string(),
            bar_filled: "#5f87ff".to_string(),
            bar_empty: "#303030".to_string(),
            success: "#87d75f".to_string(),
            error: "#ff5f5f".to_string(),
            warning: "#ffd75f".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb`, or `reset` for the terminal's own color.
    pub fn parse_color(value: &str) -> Color {
        if value.eq_ignore_ascii_case("reset") {
            return Color::Reset;
        }
        let hex = value.trim_start_matches('#');
        if hex.len() == 6
            && hex.is_ascii()
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn token_fg(&self) -> Color { Self::parse_color(&self.token_fg) }
    pub fn token_bg(&self) -> Color { Self::parse_color(&self.token_bg) }
    pub fn token_used(&self) -> Color { Self::parse_color(&self.token_used) }
    pub fn token_cursor_fg(&self) -> Color { Self::parse_color(&self.token_cursor_fg) }
    pub fn token_cursor_bg(&self) -> Color { Self::parse_color(&self.token_cursor_bg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
}
