//! Config overlay: palette picker, tag form, defined tags, link form and
//! export text.

use std::collections::BTreeSet;

use linkdeck_core::command::{Command as CoreCommand, Session};
use linkdeck_surface::color::parse_hex;
use linkdeck_surface::input::{InputEvent, Key, KeyEvent};
use linkdeck_surface::render::{Rect, RenderFrame, TextRole};
use linkdeck_surface::widgets::{text_width, truncate, BorderStyle};

use crate::text_input::{apply_text_key, field_line};

const PANEL_MAX_WIDTH: usize = 76;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Palette,
    Tags,
    DefinedTags,
    NewLink,
    Export,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Palette,
        Section::Tags,
        Section::DefinedTags,
        Section::NewLink,
        Section::Export,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Palette => "Palette",
            Self::Tags => "Tag",
            Self::DefinedTags => "Defined tags",
            Self::NewLink => "New link",
            Self::Export => "Export",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Palette => "\u{2190}/\u{2192} pick  Enter select  type #hex in Custom",
            Self::Tags => "type a name  Enter save (existing names get the new color)",
            Self::DefinedTags => "\u{2191}/\u{2193} move  x remove definition",
            Self::NewLink => "\u{2191}/\u{2193} field  Space toggle tag  Enter add link",
            Self::Export => "\u{2191}/\u{2193} scroll  y copy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkField {
    #[default]
    Title,
    Url,
    Desc,
    Tags,
}

impl LinkField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Url,
            Self::Url => Self::Desc,
            Self::Desc | Self::Tags => Self::Tags,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title | Self::Url => Self::Title,
            Self::Desc => Self::Url,
            Self::Tags => Self::Desc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPanelModel {
    section: Section,
    /// Equal to the palette length when the custom slot is selected.
    palette_cursor: usize,
    custom_color: String,
    tag_name: String,
    defined_cursor: usize,
    link_field: LinkField,
    title: String,
    url: String,
    desc: String,
    checked: BTreeSet<String>,
    check_cursor: usize,
    export_scroll: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    None,
    Close,
    Dispatch(CoreCommand),
    CopyExport,
}

impl ConfigPanelModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn link_field(&self) -> LinkField {
        self.link_field
    }

    #[must_use]
    pub fn checked_tags(&self) -> &BTreeSet<String> {
        &self.checked
    }

    #[must_use]
    pub fn export_scroll(&self) -> usize {
        self.export_scroll
    }

    /// Reset the form a successful command came from.
    pub fn committed(&mut self, command: &CoreCommand) {
        match command {
            CoreCommand::UpsertTag { .. } => self.tag_name.clear(),
            CoreCommand::CreateLink { .. } => {
                self.title.clear();
                self.url.clear();
                self.desc.clear();
                self.checked.clear();
                self.link_field = LinkField::Title;
                self.check_cursor = 0;
            }
            CoreCommand::AddCustomColor(_) => self.custom_color.clear(),
            _ => {}
        }
    }

    /// Keep cursors valid after the session changed underneath.
    pub fn clamp(&mut self, session: &Session) {
        let state = session.state();
        self.palette_cursor = self.palette_cursor.min(state.palette.colors().len());
        self.defined_cursor = self
            .defined_cursor
            .min(state.tags_config.len().saturating_sub(1));
        let display = &session.derived().display_tags;
        self.checked.retain(|tag| display.contains(tag));
        self.check_cursor = self.check_cursor.min(display.len().saturating_sub(1));
        let export_lines = session.export_text().lines().count();
        self.export_scroll = self.export_scroll.min(export_lines.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

pub fn apply_config_input(
    panel: &mut ConfigPanelModel,
    session: &Session,
    event: InputEvent,
) -> ConfigAction {
    let InputEvent::Key(key) = event else {
        return ConfigAction::None;
    };
    match key.key {
        Key::Escape => return ConfigAction::Close,
        Key::Tab => {
            panel.section = panel.section.next();
            return ConfigAction::None;
        }
        Key::BackTab => {
            panel.section = panel.section.prev();
            return ConfigAction::None;
        }
        _ => {}
    }
    match panel.section {
        Section::Palette => palette_input(panel, session, key),
        Section::Tags => tag_form_input(panel, key),
        Section::DefinedTags => defined_tags_input(panel, session, key),
        Section::NewLink => link_form_input(panel, session, key),
        Section::Export => export_input(panel, session, key),
    }
}

fn palette_input(panel: &mut ConfigPanelModel, session: &Session, key: KeyEvent) -> ConfigAction {
    let colors = session.state().palette.colors();
    match key.key {
        Key::Left => panel.palette_cursor = panel.palette_cursor.saturating_sub(1),
        Key::Right => panel.palette_cursor = (panel.palette_cursor + 1).min(colors.len()),
        Key::Enter => {
            if let Some(color) = colors.get(panel.palette_cursor) {
                return ConfigAction::Dispatch(CoreCommand::SelectColor(color.clone()));
            }
            // Anything but #RGB/#RRGGBB is ignored and stays in the field.
            let custom = panel.custom_color.trim();
            if parse_hex(custom).is_some() {
                return ConfigAction::Dispatch(CoreCommand::AddCustomColor(custom.to_owned()));
            }
        }
        Key::Char(' ') if panel.palette_cursor < colors.len() => {
            if let Some(color) = colors.get(panel.palette_cursor) {
                return ConfigAction::Dispatch(CoreCommand::SelectColor(color.clone()));
            }
        }
        _ if panel.palette_cursor == colors.len() => {
            apply_text_key(&mut panel.custom_color, key);
        }
        _ => {}
    }
    ConfigAction::None
}

fn tag_form_input(panel: &mut ConfigPanelModel, key: KeyEvent) -> ConfigAction {
    if key.key == Key::Enter {
        return ConfigAction::Dispatch(CoreCommand::UpsertTag {
            name: panel.tag_name.clone(),
            color: None,
        });
    }
    apply_text_key(&mut panel.tag_name, key);
    ConfigAction::None
}

fn defined_tags_input(
    panel: &mut ConfigPanelModel,
    session: &Session,
    key: KeyEvent,
) -> ConfigAction {
    let defs = &session.state().tags_config;
    match key.key {
        Key::Up | Key::Char('k') => panel.defined_cursor = panel.defined_cursor.saturating_sub(1),
        Key::Down | Key::Char('j') => {
            panel.defined_cursor = (panel.defined_cursor + 1).min(defs.len().saturating_sub(1));
        }
        Key::Char('x') | Key::Delete => {
            if let Some(def) = defs.get(panel.defined_cursor) {
                return ConfigAction::Dispatch(CoreCommand::RemoveTagDefinition(def.name.clone()));
            }
        }
        _ => {}
    }
    ConfigAction::None
}

fn link_form_input(panel: &mut ConfigPanelModel, session: &Session, key: KeyEvent) -> ConfigAction {
    let display = &session.derived().display_tags;
    match key.key {
        Key::Up => panel.link_field = panel.link_field.prev(),
        Key::Down => panel.link_field = panel.link_field.next(),
        Key::Enter => {
            let tags = display
                .iter()
                .filter(|tag| panel.checked.contains(*tag))
                .cloned()
                .collect();
            return ConfigAction::Dispatch(CoreCommand::CreateLink {
                title: panel.title.clone(),
                url: panel.url.clone(),
                desc: panel.desc.clone(),
                tags,
            });
        }
        _ => match panel.link_field {
            LinkField::Title => {
                apply_text_key(&mut panel.title, key);
            }
            LinkField::Url => {
                apply_text_key(&mut panel.url, key);
            }
            LinkField::Desc => {
                apply_text_key(&mut panel.desc, key);
            }
            LinkField::Tags => match key.key {
                Key::Left | Key::Char('h') => {
                    panel.check_cursor = panel.check_cursor.saturating_sub(1);
                }
                Key::Right | Key::Char('l') => {
                    panel.check_cursor =
                        (panel.check_cursor + 1).min(display.len().saturating_sub(1));
                }
                Key::Char(' ') => {
                    if let Some(tag) = display.get(panel.check_cursor) {
                        if !panel.checked.remove(tag) {
                            panel.checked.insert(tag.clone());
                        }
                    }
                }
                _ => {}
            },
        },
    }
    ConfigAction::None
}

fn export_input(panel: &mut ConfigPanelModel, session: &Session, key: KeyEvent) -> ConfigAction {
    let last = session.export_text().lines().count().saturating_sub(1);
    match key.key {
        Key::Up | Key::Char('k') => panel.export_scroll = panel.export_scroll.saturating_sub(1),
        Key::Down | Key::Char('j') => panel.export_scroll = (panel.export_scroll + 1).min(last),
        Key::PageUp => panel.export_scroll = panel.export_scroll.saturating_sub(10),
        Key::PageDown => panel.export_scroll = (panel.export_scroll + 10).min(last),
        Key::Home => panel.export_scroll = 0,
        Key::End => panel.export_scroll = last,
        Key::Char('y') | Key::Enter => return ConfigAction::CopyExport,
        _ => {}
    }
    ConfigAction::None
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_config_panel(
    frame: &mut RenderFrame,
    area: Rect,
    panel: &ConfigPanelModel,
    session: &Session,
) {
    let width = PANEL_MAX_WIDTH.min(area.width.saturating_sub(4)).max(20);
    let height = area.height.saturating_sub(2).max(8);
    let rect = area.centered(width, height);
    let border = frame.color_for_role(TextRole::Accent);
    let inner = frame.draw_panel(rect, "Configure", BorderStyle::Rounded, border);
    if inner.width == 0 || inner.height < 3 {
        return;
    }

    // Section tabs.
    let mut x = 0;
    for section in Section::ALL {
        let role = if section == panel.section {
            TextRole::Focus
        } else {
            TextRole::Muted
        };
        x += frame.draw_text_in_rect(inner, x, 0, section.title(), role) + 2;
    }

    let body = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(3),
        ..inner
    };
    match panel.section {
        Section::Palette => render_palette(frame, body, panel, session),
        Section::Tags => render_tag_form(frame, body, panel, session),
        Section::DefinedTags => render_defined_tags(frame, body, panel, session),
        Section::NewLink => render_link_form(frame, body, panel, session),
        Section::Export => render_export(frame, body, panel, session),
    }

    let hint = truncate(panel.section.hint(), inner.width);
    frame.draw_text_in_rect(inner, 0, inner.height - 1, &hint, TextRole::Muted);
}

fn render_palette(frame: &mut RenderFrame, body: Rect, panel: &ConfigPanelModel, session: &Session) {
    let palette = &session.state().palette;
    let (mut x, mut row) = (0, 0);
    for (idx, color) in palette.colors().iter().enumerate() {
        let label = if color == palette.active() {
            format!("\u{2713} {color}")
        } else {
            color.clone()
        };
        let slot = text_width(&label) + 3;
        if x > 0 && x + slot > body.width {
            x = 0;
            row += 1;
        }
        if row >= body.height {
            return;
        }
        if idx == panel.palette_cursor {
            frame.draw_text(body.x + x, body.y + row, "\u{25b8}", TextRole::Focus);
        }
        frame.draw_chip(body.x + x + 1, body.y + row, &label, parse_hex(color), false);
        x += slot + 1;
    }

    let custom_focused = panel.palette_cursor == palette.colors().len();
    let custom_row = row + 2;
    if custom_focused {
        frame.draw_text_in_rect(body, 0, custom_row, "\u{25b8}", TextRole::Focus);
    }
    let line = field_line("Custom", &panel.custom_color, custom_focused);
    let role = if custom_focused {
        TextRole::Primary
    } else {
        TextRole::Muted
    };
    frame.draw_text_in_rect(body, 2, custom_row, &line, role);
    let used = frame.draw_text_in_rect(body, 0, custom_row + 2, "New tags use ", TextRole::Muted);
    let color = palette.color_for_new_tag();
    if custom_row + 2 < body.height {
        frame.draw_chip(body.x + used, body.y + custom_row + 2, color, parse_hex(color), false);
    }
}

fn render_tag_form(frame: &mut RenderFrame, body: Rect, panel: &ConfigPanelModel, session: &Session) {
    let line = field_line("Name", &panel.tag_name, true);
    frame.draw_text_in_rect(body, 0, 0, &truncate(&line, body.width), TextRole::Primary);
    let used = frame.draw_text_in_rect(body, 0, 2, "Color ", TextRole::Muted);
    let color = session.state().palette.color_for_new_tag();
    if body.height > 2 {
        frame.draw_chip(body.x + used, body.y + 2, color, parse_hex(color), false);
    }
}

fn render_defined_tags(
    frame: &mut RenderFrame,
    body: Rect,
    panel: &ConfigPanelModel,
    session: &Session,
) {
    let defs = &session.state().tags_config;
    if defs.is_empty() {
        frame.draw_text_in_rect(body, 0, 0, "No defined tags.", TextRole::Muted);
        return;
    }
    let first = (panel.defined_cursor + 1).saturating_sub(body.height.max(1));
    for (row, (idx, def)) in defs.iter().enumerate().skip(first).enumerate() {
        if row >= body.height {
            break;
        }
        let y = body.y + row;
        if idx == panel.defined_cursor {
            frame.draw_text(body.x, y, "\u{25b8}", TextRole::Focus);
        }
        let name = truncate(&def.name, body.width.saturating_sub(14).max(1));
        let used = frame.draw_chip(body.x + 2, y, &name, parse_hex(&def.color), false);
        frame.draw_text_in_rect(body, 3 + used, row, &def.color, TextRole::Muted);
    }
}

fn render_link_form(frame: &mut RenderFrame, body: Rect, panel: &ConfigPanelModel, session: &Session) {
    let fields = [
        (LinkField::Title, "Title", panel.title.as_str()),
        (LinkField::Url, "URL", panel.url.as_str()),
        (LinkField::Desc, "Description", panel.desc.as_str()),
    ];
    for (row, (field, label, value)) in fields.into_iter().enumerate() {
        let focused = panel.link_field == field;
        let role = if focused {
            TextRole::Primary
        } else {
            TextRole::Muted
        };
        let line = truncate(&field_line(label, value, focused), body.width);
        frame.draw_text_in_rect(body, 0, row, &line, role);
    }

    let tags_focused = panel.link_field == LinkField::Tags;
    let label_role = if tags_focused {
        TextRole::Primary
    } else {
        TextRole::Muted
    };
    frame.draw_text_in_rect(body, 0, 4, "Tags:", label_role);
    let display = &session.derived().display_tags;
    if display.is_empty() {
        frame.draw_text_in_rect(body, 6, 4, "(none yet)", TextRole::Muted);
        return;
    }
    let (mut x, mut row) = (6, 4);
    for (idx, tag) in display.iter().enumerate() {
        let mark = if panel.checked.contains(tag) { 'x' } else { ' ' };
        let item = format!("[{mark}] {tag}");
        let item_width = text_width(&item);
        if x > 6 && x + item_width > body.width {
            x = 6;
            row += 1;
        }
        if row >= body.height {
            break;
        }
        let role = if tags_focused && idx == panel.check_cursor {
            TextRole::Focus
        } else {
            TextRole::Primary
        };
        frame.draw_text_in_rect(body, x, row, &item, role);
        x += item_width + 2;
    }
}

fn render_export(frame: &mut RenderFrame, body: Rect, panel: &ConfigPanelModel, session: &Session) {
    for (row, line) in session
        .export_text()
        .lines()
        .skip(panel.export_scroll)
        .take(body.height)
        .enumerate()
    {
        frame.draw_text_in_rect(body, 0, row, &truncate(line, body.width), TextRole::Primary);
    }
}
