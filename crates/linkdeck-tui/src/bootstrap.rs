//! Startup wiring: config to session, preferences to theme.

use std::path::Path;

use linkdeck_core::collation::Collation;
use linkdeck_core::command::Session;
use linkdeck_core::config::Config;
use linkdeck_core::error::LoadError;
use linkdeck_core::model::Document;
use linkdeck_core::palette::Palette;
use linkdeck_core::prefs::{detect_color_scheme, Preferences, Theme};
use linkdeck_core::source::{load_document, DataSource};
use linkdeck_core::state::AppState;
use tracing::warn;

use crate::app::App;

/// Stored preference, else the terminal color scheme, else dark.
#[must_use]
pub fn resolve_theme(config: &Config) -> Theme {
    let prefs = Preferences::load(&config.state_path).unwrap_or_else(|err| {
        warn!(path = %config.state_path.display(), error = %err, "ignoring unreadable preferences");
        Preferences::default()
    });
    prefs.effective_theme(detect_color_scheme())
}

/// Store `theme`, keeping any other preference already on disk.
pub fn persist_theme(path: &Path, theme: Theme) -> Result<(), String> {
    let mut prefs = Preferences::load(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "overwriting unreadable preferences");
        Preferences::default()
    });
    prefs.theme = Some(theme);
    prefs.save(path)
}

#[must_use]
pub fn build_session(config: &Config, document: Document, theme: Theme) -> Session {
    let palette = Palette::new(config.palette.clone());
    Session::new(
        AppState::from_document(document, palette),
        Collation::for_locale(&config.locale),
        theme,
    )
}

/// Fetch the configured source once and build a session over it.
pub fn load_session(config: &Config, theme: Theme) -> Result<Session, LoadError> {
    let source = DataSource::parse(&config.source);
    let document = load_document(&source, config.http_timeout())?;
    Ok(build_session(config, document, theme))
}

/// App for the interactive view. A failed load yields an empty, degraded
/// gallery instead of an error.
#[must_use]
pub fn load_app(config: &Config) -> App {
    let theme = resolve_theme(config);
    match load_session(config, theme) {
        Ok(session) => App::new(session, None, config.edit_url.clone()),
        Err(err) => App::new(
            build_session(config, Document::default(), theme),
            Some(err.to_string()),
            config.edit_url.clone(),
        ),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default_from_env();
        config.state_path = dir.join("state.json");
        config.source = dir.join("data.json").display().to_string();
        config.locale = "C".to_owned();
        config
    }

    #[test]
    fn persisted_theme_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        persist_theme(&config.state_path, Theme::Light).unwrap();
        assert_eq!(resolve_theme(&config), Theme::Light);
        persist_theme(&config.state_path, Theme::Dark).unwrap();
        assert_eq!(resolve_theme(&config), Theme::Dark);
    }

    #[test]
    fn persist_replaces_corrupt_preferences() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        std::fs::write(&config.state_path, "{not json").unwrap();
        persist_theme(&config.state_path, Theme::Light).unwrap();
        assert_eq!(
            Preferences::load(&config.state_path).unwrap().theme,
            Some(Theme::Light)
        );
    }

    #[test]
    fn session_uses_configured_palette_and_locale() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path());
        config.palette = vec!["#010203".to_owned()];
        std::fs::write(
            tmp.path().join("data.json"),
            r##"{"tags_config":[{"name":"b","color":"#fff"}],"links":[{"title":"T","url":"u","tags":["a"]}]}"##,
        )
        .unwrap();
        let session = load_session(&config, Theme::Dark).unwrap();
        assert_eq!(session.state().palette.active(), "#010203");
        assert_eq!(session.collation(), Collation::Codepoint);
        assert_eq!(session.derived().display_tags, vec!["a", "b"]);
    }

    #[test]
    fn missing_source_degrades_app() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        let app = load_app(&config);
        assert!(app.load_error().is_some_and(|err| err.starts_with("read ")));
        assert!(app.session().state().links.is_empty());
    }
}
