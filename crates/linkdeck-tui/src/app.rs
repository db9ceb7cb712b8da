//! App shell: routes input to the gallery or the config overlay, runs core
//! commands, and hands terminal side effects back to the runtime.

use std::time::{Duration, Instant};

use linkdeck_core::command::{Command as CoreCommand, Effect, Session};
use linkdeck_core::prefs::Theme;
use linkdeck_surface::input::InputEvent;
use linkdeck_surface::render::{FrameSize, Rect, RenderFrame, TextRole};
use linkdeck_surface::style::{ThemeKind, ThemeSpec};
use linkdeck_surface::widgets::truncate;

use crate::config_panel::{apply_config_input, render_config_panel, ConfigAction, ConfigPanelModel};
use crate::gallery::{apply_gallery_input, content_height, render_gallery, GalleryAction, GalleryViewModel};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_millis(1800);

const DEFAULT_WIDTH: usize = 80;
const DEFAULT_HEIGHT: usize = 24;

const GALLERY_HELP: &str =
    "/ search  Tab focus  Space toggle  y copy  o edit  d delete  c config  t theme  x clear  q quit";
const OVERLAY_HELP: &str = "Tab/Shift+Tab section  Enter submit  Esc close";

/// Terminal side effects the runtime performs for the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Copy { text: String, what: &'static str },
    OpenUrl(String),
    PersistTheme(Theme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct App {
    session: Session,
    load_error: Option<String>,
    gallery: GalleryViewModel,
    overlay: Option<ConfigPanelModel>,
    toast: Option<Toast>,
    edit_url: String,
    width: usize,
    height: usize,
    quitting: bool,
}

impl App {
    /// `load_error` puts the gallery in its degraded state; the session is
    /// still usable.
    #[must_use]
    pub fn new(session: Session, load_error: Option<String>, edit_url: impl Into<String>) -> Self {
        Self {
            session,
            load_error,
            gallery: GalleryViewModel::new(),
            overlay: None,
            toast: None,
            edit_url: edit_url.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quitting: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryViewModel {
        &self.gallery
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&ConfigPanelModel> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Drop the toast once `now` passes its deadline. Returns true when one
    /// was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn update(&mut self, event: InputEvent) -> Command {
        match event {
            InputEvent::Resize(size) => {
                self.resize(size.width, size.height);
                Command::None
            }
            InputEvent::Tick => {
                self.expire_toast(Instant::now());
                Command::None
            }
            InputEvent::Key(_) if self.overlay.is_some() => self.update_overlay(event),
            InputEvent::Key(_) => self.update_gallery(event),
        }
    }

    fn update_gallery(&mut self, event: InputEvent) -> Command {
        match apply_gallery_input(&mut self.gallery, &self.session, event) {
            GalleryAction::None => Command::None,
            GalleryAction::Quit => {
                self.quitting = true;
                Command::Quit
            }
            GalleryAction::Dispatch(command) => self.dispatch(command),
            GalleryAction::CopyUrl(url) => Command::Copy {
                text: url,
                what: "URL",
            },
            GalleryAction::OpenEdit => Command::OpenUrl(self.edit_url.clone()),
            GalleryAction::OpenConfig => {
                let mut panel = ConfigPanelModel::new();
                panel.clamp(&self.session);
                self.overlay = Some(panel);
                Command::None
            }
        }
    }

    fn update_overlay(&mut self, event: InputEvent) -> Command {
        let Some(panel) = self.overlay.as_mut() else {
            return Command::None;
        };
        match apply_config_input(panel, &self.session, event) {
            ConfigAction::None => Command::None,
            ConfigAction::Close => {
                self.overlay = None;
                Command::None
            }
            ConfigAction::Dispatch(command) => self.dispatch(command),
            ConfigAction::CopyExport => Command::Copy {
                text: self.session.export_text().to_owned(),
                what: "Export",
            },
        }
    }

    fn dispatch(&mut self, command: CoreCommand) -> Command {
        let outcome = self.session.dispatch(command.clone());
        self.gallery.clamp(&self.session);
        if let Some(panel) = self.overlay.as_mut() {
            if outcome.changed {
                panel.committed(&command);
            }
            panel.clamp(&self.session);
        }
        if let Some((kind, message)) = feedback(&command, outcome.changed) {
            self.notify(kind, message);
        }
        match outcome.effect {
            Effect::PersistTheme(theme) => Command::PersistTheme(theme),
            Effect::None => Command::None,
        }
    }

    #[must_use]
    pub fn render(&self) -> RenderFrame {
        self.render_at(self.width, self.height)
    }

    /// Plain-text render tall enough to show every visible card.
    #[must_use]
    pub fn snapshot_text(&self, width: usize) -> String {
        let height = content_height(&self.session, width, self.load_error()) + 1;
        self.render_at(width, height)
            .snapshot()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_at(&self, width: usize, height: usize) -> RenderFrame {
        let theme = ThemeSpec::for_kind(theme_kind(self.session.theme()));
        let mut frame = RenderFrame::new(FrameSize { width, height }, theme);
        let (main, status) = frame.area().split_vertical(height.saturating_sub(1));
        render_gallery(
            &mut frame,
            main,
            &self.gallery,
            &self.session,
            self.load_error.as_deref(),
        );
        if let Some(panel) = &self.overlay {
            render_config_panel(&mut frame, main, panel, &self.session);
        }
        self.render_status(&mut frame, status);
        frame
    }

    fn render_status(&self, frame: &mut RenderFrame, status: Rect) {
        if status.height == 0 {
            return;
        }
        let (line, role) = if let Some(link) = self.gallery.pending_delete() {
            (
                format!(
                    "Delete \"{}\"? y to confirm, any other key cancels",
                    link.display_title()
                ),
                TextRole::Danger,
            )
        } else if let Some(toast) = &self.toast {
            let role = match toast.kind {
                ToastKind::Info => TextRole::Accent,
                ToastKind::Success => TextRole::Success,
                ToastKind::Error => TextRole::Danger,
            };
            (toast.message.clone(), role)
        } else if self.overlay.is_some() {
            (OVERLAY_HELP.to_owned(), TextRole::Muted)
        } else {
            (GALLERY_HELP.to_owned(), TextRole::Muted)
        };
        frame.draw_text_in_rect(status, 0, 0, &truncate(&line, status.width), role);
    }
}

#[must_use]
pub fn theme_kind(theme: Theme) -> ThemeKind {
    match theme {
        Theme::Light => ThemeKind::Light,
        Theme::Dark => ThemeKind::Dark,
    }
}

fn feedback(command: &CoreCommand, changed: bool) -> Option<(ToastKind, &'static str)> {
    match (command, changed) {
        (CoreCommand::UpsertTag { .. }, true) => Some((ToastKind::Success, "Tag saved")),
        (CoreCommand::RemoveTagDefinition(_), true) => {
            Some((ToastKind::Info, "Tag definition removed"))
        }
        (CoreCommand::CreateLink { .. }, true) => Some((ToastKind::Success, "Link added")),
        (CoreCommand::DeleteLink(_), true) => Some((ToastKind::Info, "Link deleted")),
        (CoreCommand::AddCustomColor(_), true) => Some((ToastKind::Success, "Custom color added")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdeck_core::collation::Collation;
    use linkdeck_core::model::{Document, Link, TagDefinition};
    use linkdeck_core::palette::Palette;
    use linkdeck_core::state::AppState;
    use linkdeck_surface::input::{Key, KeyEvent, ResizeEvent};
    use linkdeck_surface::snapshot::frame_contains;

    fn app() -> App {
        let document = Document {
            tags_config: vec![TagDefinition::new("go", "#111111")],
            links: vec![
                Link::new("Alpha", "http://a", "", vec!["go".into()]),
                Link::new("Beta", "http://b", "", vec![]),
            ],
        };
        let session = Session::new(
            AppState::from_document(document, Palette::default()),
            Collation::Codepoint,
            Theme::Dark,
        );
        App::new(session, None, "https://example.com/edit")
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(k))
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app();
        assert_eq!(app.update(key(Key::Char('q'))), Command::Quit);
        assert!(app.quitting());
    }

    #[test]
    fn theme_toggle_requests_persist() {
        let mut app = app();
        assert_eq!(
            app.update(key(Key::Char('t'))),
            Command::PersistTheme(Theme::Light)
        );
        assert_eq!(app.session().theme(), Theme::Light);
    }

    #[test]
    fn copy_and_open_commands() {
        let mut app = app();
        assert_eq!(
            app.update(key(Key::Char('y'))),
            Command::Copy {
                text: "http://a".into(),
                what: "URL",
            }
        );
        assert_eq!(
            app.update(key(Key::Char('o'))),
            Command::OpenUrl("https://example.com/edit".into())
        );
    }

    #[test]
    fn overlay_captures_keys_until_closed() {
        let mut app = app();
        app.update(key(Key::Char('c')));
        assert!(app.overlay().is_some());
        // 'q' does not quit while the overlay is open.
        assert_eq!(app.update(key(Key::Char('q'))), Command::None);
        assert!(!app.quitting());
        app.update(key(Key::Escape));
        assert!(app.overlay().is_none());
    }

    #[test]
    fn invalid_submission_is_silent() {
        let mut app = app();
        app.update(key(Key::Char('c')));
        app.update(key(Key::Tab));
        app.update(key(Key::Char(' ')));
        app.update(key(Key::Enter));
        assert!(app.toast().is_none());
        assert_eq!(app.session().state().tags_config.len(), 1);
    }

    #[test]
    fn delete_prompt_then_toast() {
        let mut app = app();
        app.update(key(Key::Char('d')));
        assert!(frame_contains(
            &app.render(),
            "Delete \"Alpha\"? y to confirm"
        ));
        app.update(key(Key::Char('y')));
        assert_eq!(app.session().state().links.len(), 1);
        assert!(frame_contains(&app.render(), "Link deleted"));
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut app = app();
        app.notify(ToastKind::Info, "hello");
        assert!(!app.expire_toast(Instant::now()));
        let later = Instant::now() + TOAST_TTL + Duration::from_millis(1);
        assert!(app.expire_toast(later));
        assert!(app.toast().is_none());
    }

    #[test]
    fn resize_changes_frame_size() {
        let mut app = app();
        app.update(InputEvent::Resize(ResizeEvent {
            width: 40,
            height: 10,
        }));
        let size = app.render().size();
        assert_eq!((size.width, size.height), (40, 10));
    }

    #[test]
    fn snapshot_text_shows_all_cards() {
        let app = app();
        let text = app.snapshot_text(60);
        assert!(text.contains("Alpha"));
        assert!(text.contains("http://b"));
        assert!(text.lines().last().is_some_and(|line| line.starts_with("/ search")));
    }
}
