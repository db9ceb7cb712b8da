use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::collation::DEFAULT_LOCALE;
use crate::error::ConfigError;
use crate::palette::DEFAULT_COLORS;

/// Overrides the configured document source.
pub const SOURCE_ENV: &str = "LINKDECK_SOURCE";

pub const DEFAULT_SOURCE: &str = "./data.json";
pub const DEFAULT_EDIT_URL: &str =
    "https://github.com/GLoryforRichard/GLoryforRichard.github.io/blob/master/data.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// File path or `http(s)://` URL of the document.
    pub source: String,
    pub locale: String,
    pub palette: Vec<String>,
    pub edit_url: String,
    pub http: HttpConfig,
    /// Preferences file (theme).
    pub state_path: PathBuf,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `None` disables logging entirely.
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn default_from_env() -> Self {
        let home = std::env::var("HOME").unwrap_or_default();
        let state_dir = if home.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&home)
                .join(".local")
                .join("state")
                .join("linkdeck")
        };
        Self {
            source: DEFAULT_SOURCE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            palette: DEFAULT_COLORS.iter().map(|c| (*c).to_string()).collect(),
            edit_url: DEFAULT_EDIT_URL.to_string(),
            http: HttpConfig { timeout_ms: 5000 },
            state_path: state_dir.join("state.json"),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some(state_dir.join("linkdeck.log")),
            },
        }
    }

    /// Defaults overlaid with one YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let mut cfg = Self::default_from_env();
        let parsed: PartialConfig =
            serde_yaml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        apply_partial(&mut cfg, parsed)?;
        Ok(cfg)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http.timeout_ms)
    }

    /// Environment overrides. Takes the lookup result so tests stay
    /// independent of the process environment.
    pub fn apply_env_source(&mut self, value: Option<String>) {
        if let Some(source) = value.map(|v| v.trim().to_string()) {
            if !source.is_empty() {
                self.source = source;
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    #[serde(default)]
    source: String,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    palette: Vec<String>,
    #[serde(default)]
    edit_url: String,
    #[serde(default)]
    http: PartialHttpConfig,
    #[serde(default)]
    state_path: String,
    #[serde(default)]
    logging: PartialLoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
struct PartialHttpConfig {
    #[serde(default)]
    timeout_ms: i64,
}

#[derive(Debug, Default, Deserialize)]
struct PartialLoggingConfig {
    #[serde(default)]
    level: String,
    #[serde(default)]
    file: String,
}

/// Load config with precedence defaults < config file < `LINKDECK_SOURCE`.
/// An explicit path that cannot be read is a hard error; a missing default
/// file is not.
pub fn load_config(config_file: Option<&str>) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let explicit = config_file
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    let (path_to_try, used) = if let Some(path) = explicit {
        (Some(path), true)
    } else {
        (default_config_path(), false)
    };

    let mut loaded = None;
    if let Some(path) = path_to_try {
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let cfg = Config::from_yaml(&text)?;
                tracing::debug!(path = %path.display(), "loaded config file");
                loaded = Some((cfg, path));
            }
            Err(err) => {
                if used {
                    return Err(ConfigError::Read {
                        path: path.display().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    let (mut cfg, used_path) = match loaded {
        Some((cfg, path)) => (cfg, Some(path)),
        None => (Config::default_from_env(), None),
    };
    cfg.apply_env_source(std::env::var(SOURCE_ENV).ok());
    Ok((cfg, used_path))
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Some(PathBuf::from(xdg).join("linkdeck").join("config.yaml"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("linkdeck")
                    .join("config.yaml"),
            );
        }
    }
    None
}

fn apply_partial(cfg: &mut Config, partial: PartialConfig) -> Result<(), ConfigError> {
    if !partial.source.trim().is_empty() {
        cfg.source = partial.source.trim().to_string();
    }
    if !partial.locale.trim().is_empty() {
        cfg.locale = partial.locale.trim().to_string();
    }
    if !partial.palette.is_empty() {
        let colors: Vec<String> = partial
            .palette
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if colors.is_empty() {
            return Err(ConfigError::Invalid {
                key: "palette",
                message: "every entry is blank".to_string(),
            });
        }
        cfg.palette = colors;
    }
    if !partial.edit_url.trim().is_empty() {
        cfg.edit_url = partial.edit_url.trim().to_string();
    }
    if partial.http.timeout_ms < 0 {
        return Err(ConfigError::Invalid {
            key: "http.timeout_ms",
            message: format!("must be positive, got {}", partial.http.timeout_ms),
        });
    }
    if partial.http.timeout_ms > 0 {
        cfg.http.timeout_ms = partial.http.timeout_ms.unsigned_abs();
    }
    if !partial.state_path.trim().is_empty() {
        cfg.state_path = expand_tilde(partial.state_path.trim())?;
    }
    if !partial.logging.level.trim().is_empty() {
        cfg.logging.level = partial.logging.level.trim().to_string();
    }
    match partial.logging.file.trim() {
        "" => {}
        "off" | "none" => cfg.logging.file = None,
        file => cfg.logging.file = Some(expand_tilde(file)?),
    }
    Ok(())
}

fn expand_tilde(input: &str) -> Result<PathBuf, ConfigError> {
    if input == "~" {
        let home = std::env::var("HOME").map_err(|_| ConfigError::MissingHome)?;
        return Ok(PathBuf::from(home));
    }
    if let Some(rest) = input.strip_prefix("~/") {
        let home = std::env::var("HOME").map_err(|_| ConfigError::MissingHome)?;
        return Ok(PathBuf::from(home).join(rest));
    }
    Ok(Path::new(input).to_path_buf())
}
