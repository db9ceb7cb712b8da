//! Durable UI preferences (currently the light/dark theme).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable terminals use to advertise `fg;bg` color indexes.
pub const COLOR_SCHEME_ENV: &str = "COLORFGBG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Preferences {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|error| format!("parse preferences: {error}"))
    }

    pub fn to_json_pretty(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|error| format!("serialize preferences: {error}"))
    }

    /// Missing file reads as defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|error| format!("read preferences: {error}"))?;
        Self::from_json(&raw)
    }

    /// Write through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|error| format!("create preferences dir: {error}"))?;
        }
        let temp = path.with_extension("json.tmp");
        let raw = self.to_json_pretty()?;
        fs::write(&temp, raw).map_err(|error| format!("write preferences temp: {error}"))?;
        fs::rename(&temp, path).map_err(|error| format!("rename preferences temp: {error}"))
    }

    /// Stored theme, else the environment's color scheme, else dark.
    #[must_use]
    pub fn effective_theme(&self, environment: Option<Theme>) -> Theme {
        self.theme.or(environment).unwrap_or_default()
    }
}

/// Reads the terminal color scheme from `COLORFGBG`.
#[must_use]
pub fn detect_color_scheme() -> Option<Theme> {
    std::env::var(COLOR_SCHEME_ENV)
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`). Background indexes
/// 7 and 9..=15 are light.
#[must_use]
pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    if bg == 7 || (9..=15).contains(&bg) {
        Some(Theme::Light)
    } else {
        Some(Theme::Dark)
    }
}
