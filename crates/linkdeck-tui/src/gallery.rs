use linkdeck_core::command::{Command as CoreCommand, Session};
use linkdeck_core::model::Link;
use linkdeck_core::taxonomy::TagBarEntry;
use linkdeck_surface::color::parse_hex;
use linkdeck_surface::input::{translate_input, InputEvent, Key, KeyEvent, UiAction};
use linkdeck_surface::render::{Rect, RenderFrame, TextRole};
use linkdeck_surface::widgets::{text_width, truncate};

use crate::text_input::{apply_text_key, CURSOR};

/// Rows per card: title, url, description, tags, gap.
pub const CARD_HEIGHT: usize = 5;
const PAGE_STEP: usize = 5;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Cards,
    TagBar,
    Search,
}

// ---------------------------------------------------------------------------
// GalleryViewModel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryViewModel {
    focus: Focus,
    tag_cursor: usize,
    card_cursor: usize,
    search_input: String,
    pending_delete: Option<Link>,
}

impl GalleryViewModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn tag_cursor(&self) -> usize {
        self.tag_cursor
    }

    #[must_use]
    pub fn card_cursor(&self) -> usize {
        self.card_cursor
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Link awaiting a delete confirmation.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&Link> {
        self.pending_delete.as_ref()
    }

    #[must_use]
    pub fn selected_link<'a>(&self, session: &'a Session) -> Option<&'a Link> {
        session.visible_link(self.card_cursor)
    }

    /// Keep cursors inside the current tag bar and visible list.
    pub fn clamp(&mut self, session: &Session) {
        let derived = session.derived();
        self.tag_cursor = self
            .tag_cursor
            .min(derived.tag_bar.len().saturating_sub(1));
        self.card_cursor = self
            .card_cursor
            .min(derived.visible.len().saturating_sub(1));
    }

    fn move_cards(&mut self, session: &Session, delta: isize) {
        let last = session.derived().visible.len().saturating_sub(1);
        self.card_cursor = self.card_cursor.saturating_add_signed(delta).min(last);
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    None,
    Dispatch(CoreCommand),
    CopyUrl(String),
    OpenEdit,
    OpenConfig,
    Quit,
}

pub fn apply_gallery_input(
    view: &mut GalleryViewModel,
    session: &Session,
    event: InputEvent,
) -> GalleryAction {
    let InputEvent::Key(key) = event else {
        return GalleryAction::None;
    };

    // A pending delete swallows exactly one key.
    if let Some(link) = view.pending_delete.take() {
        if !key.modifiers.ctrl && matches!(key.key, Key::Char('y' | 'Y')) {
            return GalleryAction::Dispatch(CoreCommand::DeleteLink(link));
        }
        return GalleryAction::None;
    }

    if view.focus == Focus::Search {
        return apply_search_input(view, key);
    }

    if !key.modifiers.ctrl && !key.modifiers.alt {
        match key.key {
            Key::Char('q') => return GalleryAction::Quit,
            Key::Char('t') => return GalleryAction::Dispatch(CoreCommand::ToggleTheme),
            Key::Char('c') => return GalleryAction::OpenConfig,
            Key::Char('o') => return GalleryAction::OpenEdit,
            Key::Char('x') => {
                view.search_input.clear();
                return GalleryAction::Dispatch(CoreCommand::ClearFilters);
            }
            Key::Char('y') => {
                return match view.selected_link(session) {
                    Some(link) => GalleryAction::CopyUrl(link.url.clone()),
                    None => GalleryAction::None,
                };
            }
            Key::Char('d') => {
                view.pending_delete = view.selected_link(session).cloned();
                return GalleryAction::None;
            }
            _ => {}
        }
    }

    match translate_input(&event) {
        UiAction::Search => view.focus = Focus::Search,
        UiAction::NextFocus | UiAction::PrevFocus => {
            view.focus = match view.focus {
                Focus::TagBar => Focus::Cards,
                Focus::Cards | Focus::Search => Focus::TagBar,
            };
        }
        UiAction::MoveLeft if view.focus == Focus::TagBar => {
            view.tag_cursor = view.tag_cursor.saturating_sub(1);
        }
        UiAction::MoveRight if view.focus == Focus::TagBar => {
            let last = session.derived().tag_bar.len().saturating_sub(1);
            view.tag_cursor = (view.tag_cursor + 1).min(last);
        }
        UiAction::MoveDown => match view.focus {
            Focus::TagBar => view.focus = Focus::Cards,
            _ => view.move_cards(session, 1),
        },
        UiAction::MoveUp if view.focus == Focus::Cards => {
            if view.card_cursor == 0 {
                view.focus = Focus::TagBar;
            } else {
                view.move_cards(session, -1);
            }
        }
        UiAction::PageDown => view.move_cards(session, PAGE_STEP as isize),
        UiAction::PageUp => view.move_cards(session, -(PAGE_STEP as isize)),
        UiAction::Confirm if view.focus == Focus::TagBar => {
            return match session.derived().tag_bar.get(view.tag_cursor) {
                Some(TagBarEntry::All { .. }) => {
                    GalleryAction::Dispatch(CoreCommand::ClearTagSelection)
                }
                Some(TagBarEntry::Tag { name, .. }) => {
                    GalleryAction::Dispatch(CoreCommand::ToggleTag(name.clone()))
                }
                None => GalleryAction::None,
            };
        }
        _ => {}
    }
    GalleryAction::None
}

fn apply_search_input(view: &mut GalleryViewModel, key: KeyEvent) -> GalleryAction {
    match key.key {
        Key::Escape | Key::Enter | Key::Down => view.focus = Focus::Cards,
        Key::Tab | Key::BackTab => view.focus = Focus::TagBar,
        _ => {
            if apply_text_key(&mut view.search_input, key) {
                return GalleryAction::Dispatch(CoreCommand::SetSearchTerm(
                    view.search_input.clone(),
                ));
            }
        }
    }
    GalleryAction::None
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

struct ChipSlot {
    row: usize,
    x: usize,
    label: String,
}

fn entry_label(entry: &TagBarEntry) -> String {
    let name = match entry {
        TagBarEntry::All { .. } => "All",
        TagBarEntry::Tag { name, .. } => name.as_str(),
    };
    if entry.active() {
        format!("\u{2713} {name}")
    } else {
        name.to_owned()
    }
}

/// Wrap tag bar entries into rows. Each slot is a one-cell cursor marker
/// followed by the chip.
fn layout_tag_bar(entries: &[TagBarEntry], width: usize) -> Vec<ChipSlot> {
    let mut slots = Vec::with_capacity(entries.len());
    let (mut row, mut x) = (0, 0);
    for entry in entries {
        let mut label = entry_label(entry);
        let max_label = width.saturating_sub(3);
        if text_width(&label) > max_label {
            label = truncate(&label, max_label);
        }
        let slot_width = text_width(&label) + 3;
        if x > 0 && x + slot_width > width {
            row += 1;
            x = 0;
        }
        slots.push(ChipSlot { row, x, label });
        x += slot_width + 1;
    }
    slots
}

/// Rows the tag bar needs at `width`.
#[must_use]
pub fn tag_bar_rows(session: &Session, width: usize) -> usize {
    layout_tag_bar(&session.derived().tag_bar, width)
        .last()
        .map_or(0, |slot| slot.row + 1)
}

/// Rows needed to show everything without scrolling.
#[must_use]
pub fn content_height(session: &Session, width: usize, load_error: Option<&str>) -> usize {
    let cards = session.derived().visible.len().max(1) * CARD_HEIGHT;
    let error_rows = usize::from(load_error.is_some());
    3 + tag_bar_rows(session, width) + error_rows + cards
}

pub fn render_gallery(
    frame: &mut RenderFrame,
    area: Rect,
    view: &GalleryViewModel,
    session: &Session,
    load_error: Option<&str>,
) {
    let width = area.width;
    if width == 0 || area.height == 0 {
        return;
    }
    let derived = session.derived();

    // Header.
    let used = frame.draw_text_in_rect(area, 0, 0, "linkdeck", TextRole::Accent);
    let summary = format!(
        "  {}/{} links  filter: {}  theme: {}",
        derived.visible.len(),
        session.state().links.len(),
        session.state().filter.active_label(),
        session.theme().as_str(),
    );
    frame.draw_text_in_rect(area, used, 0, &summary, TextRole::Muted);

    // Search.
    if area.height > 1 {
        let focused = view.focus == Focus::Search;
        let (line, role) = if focused {
            (format!("Search: {}{CURSOR}", view.search_input), TextRole::Focus)
        } else if view.search_input.is_empty() {
            ("Search: (Ctrl+K or /)".to_owned(), TextRole::Muted)
        } else {
            (format!("Search: {}", view.search_input), TextRole::Primary)
        };
        frame.draw_text_in_rect(area, 0, 1, &truncate(&line, width), role);
    }

    // Tag bar.
    let tag_top = area.y + 2;
    let slots = layout_tag_bar(&derived.tag_bar, width);
    let tag_rows = slots.last().map_or(0, |slot| slot.row + 1);
    let show_cursor = view.focus == Focus::TagBar;
    for (idx, (slot, entry)) in slots.iter().zip(&derived.tag_bar).enumerate() {
        let y = tag_top + slot.row;
        if y >= area.bottom() {
            break;
        }
        let x = area.x + slot.x;
        if show_cursor && idx == view.tag_cursor {
            frame.draw_text(x, y, "\u{25b8}", TextRole::Focus);
        }
        let color = match entry {
            TagBarEntry::All { active: true } => Some(frame.color_for_role(TextRole::Accent)),
            TagBarEntry::All { active: false } => None,
            TagBarEntry::Tag { color, .. } => color.as_deref().and_then(parse_hex),
        };
        frame.draw_chip(x + 1, y, &slot.label, color, entry.active());
    }

    let rule_y = tag_top + tag_rows;
    if rule_y < area.bottom() {
        frame.draw_horizontal_rule(area.x, rule_y, width, TextRole::Muted);
    }

    // Cards.
    let mut body_top = rule_y + 1;
    if let Some(error) = load_error {
        if body_top < area.bottom() {
            let line = format!("Failed to load links: {error}");
            frame.draw_text(area.x, body_top, &truncate(&line, width), TextRole::Danger);
        }
        body_top += 1;
    }
    if body_top >= area.bottom() {
        return;
    }
    let body_h = area.bottom() - body_top;

    if derived.visible.is_empty() {
        if load_error.is_none() {
            let message = if session.state().links.is_empty() {
                "No links yet. Press c to add one."
            } else {
                "No links match the current filters."
            };
            frame.draw_text(area.x, body_top, &truncate(message, width), TextRole::Muted);
        }
        return;
    }

    let cards_fit = (body_h / CARD_HEIGHT).max(1);
    let first = if view.card_cursor >= cards_fit {
        view.card_cursor + 1 - cards_fit
    } else {
        0
    };
    let mut y = body_top;
    for position in first..derived.visible.len() {
        if y >= area.bottom() {
            break;
        }
        let Some(link) = session.visible_link(position) else {
            continue;
        };
        let selected = view.focus == Focus::Cards && position == view.card_cursor;
        render_card(frame, area, y, link, session, selected);
        y += CARD_HEIGHT;
    }
}

fn render_card(
    frame: &mut RenderFrame,
    area: Rect,
    top: usize,
    link: &Link,
    session: &Session,
    selected: bool,
) {
    let width = area.width;
    let inner = width.saturating_sub(2);
    let x = area.x;
    let rows_left = area.bottom() - top;

    if selected {
        frame.draw_text(x, top, "\u{258c}", TextRole::Focus);
    }
    frame.draw_text(x + 2, top, &truncate(link.display_title(), inner), TextRole::Accent);
    if rows_left > 1 {
        frame.draw_text(x + 2, top + 1, &truncate(&link.url, inner), TextRole::Muted);
    }
    if rows_left > 2 {
        let role = if link.description().is_some() {
            TextRole::Primary
        } else {
            TextRole::Muted
        };
        frame.draw_text(x + 2, top + 2, &truncate(link.display_desc(), inner), role);
    }
    if rows_left > 3 {
        let mut chip_x = x + 2;
        for tag in link.tags().iter().filter(|tag| !tag.is_empty()) {
            let chip_width = text_width(tag) + 2;
            if chip_x + chip_width > x + width {
                break;
            }
            let color = session.tag_color(tag).and_then(parse_hex);
            chip_x += frame.draw_chip(chip_x, top + 3, tag, color, false) + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use linkdeck_core::collation::Collation;
    use linkdeck_core::model::{Document, TagDefinition};
    use linkdeck_core::palette::Palette;
    use linkdeck_core::prefs::Theme;
    use linkdeck_core::state::AppState;
    use linkdeck_surface::input::{KeyEvent, Modifiers};
    use linkdeck_surface::render::FrameSize;
    use linkdeck_surface::snapshot::{assert_render_frame_snapshot, frame_contains};
    use linkdeck_surface::style::ThemeSpec;

    fn session() -> Session {
        let document = Document {
            tags_config: vec![TagDefinition::new("go", "#111111")],
            links: vec![
                Link::new("A", "http://a", "", vec!["go".into()]),
                Link::new("B", "http://b", "second", vec![]),
            ],
        };
        Session::new(
            AppState::from_document(document, Palette::default()),
            Collation::Codepoint,
            Theme::Dark,
        )
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(k))
    }

    fn apply(view: &mut GalleryViewModel, session: &mut Session, event: InputEvent) -> GalleryAction {
        let action = apply_gallery_input(view, session, event);
        if let GalleryAction::Dispatch(command) = action.clone() {
            session.dispatch(command);
            view.clamp(session);
        }
        action
    }

    #[test]
    fn toggling_tag_from_tag_bar() {
        let mut session = session();
        let mut view = GalleryViewModel::new();
        apply(&mut view, &mut session, key(Key::Tab));
        assert_eq!(view.focus(), Focus::TagBar);
        apply(&mut view, &mut session, key(Key::Right));
        let action = apply(&mut view, &mut session, key(Key::Char(' ')));
        assert_eq!(
            action,
            GalleryAction::Dispatch(CoreCommand::ToggleTag("go".into()))
        );
        assert_eq!(session.derived().visible, vec![0]);

        apply(&mut view, &mut session, key(Key::Left));
        apply(&mut view, &mut session, key(Key::Enter));
        assert_eq!(session.derived().visible, vec![0, 1]);
    }

    #[test]
    fn search_typing_filters_live() {
        let mut session = session();
        let mut view = GalleryViewModel::new();
        apply(&mut view, &mut session, InputEvent::Key(KeyEvent::ctrl('k')));
        assert_eq!(view.focus(), Focus::Search);
        apply(&mut view, &mut session, key(Key::Char('s')));
        apply(&mut view, &mut session, key(Key::Char('e')));
        assert_eq!(session.derived().visible, vec![1]);
        // 'q' is text while searching.
        let action = apply(&mut view, &mut session, key(Key::Char('q')));
        assert_ne!(action, GalleryAction::Quit);
        apply(&mut view, &mut session, key(Key::Escape));
        assert_eq!(view.focus(), Focus::Cards);
        assert_eq!(view.search_input(), "seq");
    }

    #[test]
    fn clear_key_resets_search_buffer() {
        let mut session = session();
        let mut view = GalleryViewModel::new();
        apply(&mut view, &mut session, key(Key::Char('/')));
        apply(&mut view, &mut session, key(Key::Char('z')));
        apply(&mut view, &mut session, key(Key::Enter));
        assert!(session.derived().visible.is_empty());
        apply(&mut view, &mut session, key(Key::Char('x')));
        assert_eq!(view.search_input(), "");
        assert_eq!(session.derived().visible.len(), 2);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut session = session();
        let mut view = GalleryViewModel::new();
        apply(&mut view, &mut session, key(Key::Char('d')));
        assert!(view.pending_delete().is_some());
        apply(&mut view, &mut session, key(Key::Char('n')));
        assert!(view.pending_delete().is_none());
        assert_eq!(session.state().links.len(), 2);

        apply(&mut view, &mut session, key(Key::Down));
        apply(&mut view, &mut session, key(Key::Char('d')));
        let action = apply(&mut view, &mut session, key(Key::Char('y')));
        assert!(matches!(
            action,
            GalleryAction::Dispatch(CoreCommand::DeleteLink(_))
        ));
        assert_eq!(session.state().links.len(), 1);
        assert_eq!(view.card_cursor(), 0);
    }

    #[test]
    fn copy_and_global_keys() {
        let mut session = session();
        let mut view = GalleryViewModel::new();
        assert_eq!(
            apply(&mut view, &mut session, key(Key::Char('y'))),
            GalleryAction::CopyUrl("http://a".into())
        );
        assert_eq!(
            apply(&mut view, &mut session, key(Key::Char('o'))),
            GalleryAction::OpenEdit
        );
        assert_eq!(
            apply(&mut view, &mut session, key(Key::Char('c'))),
            GalleryAction::OpenConfig
        );
        assert_eq!(
            apply(&mut view, &mut session, key(Key::Char('q'))),
            GalleryAction::Quit
        );
        let ctrl_q = InputEvent::Key(KeyEvent {
            key: Key::Char('q'),
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::none()
            },
        });
        assert_eq!(apply(&mut view, &mut session, ctrl_q), GalleryAction::None);
    }

    #[test]
    fn gallery_frame_snapshot() {
        let session = session();
        let view = GalleryViewModel::new();
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 60,
                height: 14,
            },
            ThemeSpec::default(),
        );
        let area = frame.area();
        render_gallery(&mut frame, area, &view, &session, None);
        let expected = format!(
            "linkdeck  2/2 links  filter: none  theme: dark\n\
             Search: (Ctrl+K or /)\n\
             \x20 \u{2713} All    go\n\
             {rule}\n\
             \u{258c} A\n\
             \x20 http://a\n\
             \x20 No description\n\
             \x20  go\n\
             \n\
             \x20 B\n\
             \x20 http://b\n\
             \x20 second",
            rule = "\u{2500}".repeat(60),
        );
        assert_render_frame_snapshot("gallery", &frame, &expected);
    }

    #[test]
    fn load_error_is_shown_in_card_area() {
        let session = Session::new(AppState::default(), Collation::Codepoint, Theme::Light);
        let view = GalleryViewModel::new();
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 50,
                height: 8,
            },
            ThemeSpec::default(),
        );
        let area = frame.area();
        render_gallery(&mut frame, area, &view, &session, Some("unexpected status 404"));
        assert!(frame_contains(&frame, "Failed to load links: unexpected status 404"));
        assert!(!frame_contains(&frame, "No links yet"));
    }

    #[test]
    fn tag_bar_wraps_at_width() {
        let document = Document {
            tags_config: ["alpha", "bravo", "charlie", "delta"]
                .iter()
                .map(|name| TagDefinition::new(name, "#222222"))
                .collect(),
            links: vec![],
        };
        let session = Session::new(
            AppState::from_document(document, Palette::default()),
            Collation::Codepoint,
            Theme::Dark,
        );
        assert_eq!(tag_bar_rows(&session, 80), 1);
        assert_eq!(tag_bar_rows(&session, 20), 3);
        assert_eq!(content_height(&session, 80, None), 3 + 1 + CARD_HEIGHT);
    }
}
