//! Cell grid the app draws into.

use unicode_width::UnicodeWidthChar;

use crate::color::TermColor;
use crate::style::{StyleToken, ThemeSpec};
use crate::widgets::{truncate, BorderStyle};

/// Glyph stored in the right half of a double-width character.
pub const WIDE_CONTINUATION: char = '\0';

/// Frame dimensions in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub fn right(self) -> usize {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> usize {
        self.y + self.height
    }

    /// Inner region after removing a one-cell border.
    #[must_use]
    pub fn inner(self) -> Self {
        self.shrink(1, 1)
    }

    /// Remove `dx` columns from each side and `dy` rows from top and bottom.
    #[must_use]
    pub fn shrink(self, dx: usize, dy: usize) -> Self {
        if self.width < dx * 2 || self.height < dy * 2 {
            return Self {
                x: self.x,
                y: self.y,
                width: 0,
                height: 0,
            };
        }
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - dx * 2,
            height: self.height - dy * 2,
        }
    }

    /// Split into top (`top_height` rows) and bottom.
    #[must_use]
    pub fn split_vertical(self, top_height: usize) -> (Self, Self) {
        let top_h = top_height.min(self.height);
        (
            Self {
                height: top_h,
                ..self
            },
            Self {
                y: self.y + top_h,
                height: self.height - top_h,
                ..self
            },
        )
    }

    /// A `width` x `height` rect centered inside `self`.
    #[must_use]
    pub fn centered(self, width: usize, height: usize) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: TermColor,
    pub bg: TermColor,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl CellStyle {
    #[must_use]
    pub fn plain(fg: TermColor, bg: TermColor) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: char,
    pub style: CellStyle,
}

/// Semantic role for rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Primary,
    Muted,
    Accent,
    Success,
    Danger,
    Focus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    size: FrameSize,
    cells: Vec<FrameCell>,
    theme: ThemeSpec,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: FrameSize, theme: ThemeSpec) -> Self {
        let blank = FrameCell {
            glyph: ' ',
            style: CellStyle::plain(
                theme.color(StyleToken::Foreground),
                theme.color(StyleToken::Background),
            ),
        };
        Self {
            size,
            cells: vec![blank; size.width.saturating_mul(size.height)],
            theme,
        }
    }

    #[must_use]
    pub fn theme(&self) -> ThemeSpec {
        self.theme
    }

    #[must_use]
    pub fn size(&self) -> FrameSize {
        self.size
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.size.width,
            height: self.size.height,
        }
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<FrameCell> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.cells.get(y * self.size.width + x).copied()
    }

    /// Write a single cell, clipped to frame bounds.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: FrameCell) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let idx = y * self.size.width + x;
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    /// Draw text on one row in a theme role. Returns columns written.
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str, role: TextRole) -> usize {
        let mut style = self.style_for_role(role);
        style.bg = self.cell(x, y).map_or(style.bg, |cell| cell.style.bg);
        self.put_text(x, y, self.size.width, text, style)
    }

    /// Draw text clipped to `rect`, offset from its origin.
    pub fn draw_text_in_rect(
        &mut self,
        rect: Rect,
        x_offset: usize,
        y_offset: usize,
        text: &str,
        role: TextRole,
    ) -> usize {
        let x = rect.x + x_offset;
        let y = rect.y + y_offset;
        if y >= rect.bottom() {
            return 0;
        }
        let mut style = self.style_for_role(role);
        style.bg = self.cell(x, y).map_or(style.bg, |cell| cell.style.bg);
        self.put_text(x, y, rect.right(), text, style)
    }

    /// Draw text with an explicit style.
    pub fn draw_styled_text(&mut self, x: usize, y: usize, text: &str, style: CellStyle) -> usize {
        self.put_text(x, y, self.size.width, text, style)
    }

    /// Draw a ` label ` chip on `color` (the theme's fallback when `None`).
    /// Active chips are bold and underlined.
    pub fn draw_chip(
        &mut self,
        x: usize,
        y: usize,
        label: &str,
        color: Option<TermColor>,
        active: bool,
    ) -> usize {
        let bg = color.unwrap_or(self.theme.color(StyleToken::ChipFallback));
        let style = CellStyle {
            fg: bg.contrast_fg(),
            bg,
            bold: active,
            dim: false,
            underline: active,
        };
        self.put_text(x, y, self.size.width, &format!(" {label} "), style)
    }

    pub fn fill_rect(&mut self, rect: Rect, bg: TermColor) {
        let style = CellStyle::plain(self.theme.color(StyleToken::Foreground), bg);
        for row in rect.y..rect.bottom() {
            for col in rect.x..rect.right() {
                self.set_cell(col, row, FrameCell { glyph: ' ', style });
            }
        }
    }

    /// Draw a bordered panel on the surface color and return its inner rect.
    pub fn draw_panel(
        &mut self,
        rect: Rect,
        title: &str,
        border: BorderStyle,
        border_color: TermColor,
    ) -> Rect {
        if rect.width < 2 || rect.height < 2 {
            return rect.inner();
        }
        let bg = self.theme.color(StyleToken::Surface);
        self.fill_rect(rect, bg);

        let glyphs = border.glyphs();
        let edge = CellStyle::plain(border_color, bg);
        let put = |frame: &mut Self, x: usize, y: usize, glyph: char| {
            frame.set_cell(x, y, FrameCell { glyph, style: edge });
        };
        let (left, right) = (rect.x, rect.right() - 1);
        let (top, bottom) = (rect.y, rect.bottom() - 1);
        for col in left + 1..right {
            put(self, col, top, glyphs.horizontal);
            put(self, col, bottom, glyphs.horizontal);
        }
        for row in top + 1..bottom {
            put(self, left, row, glyphs.vertical);
            put(self, right, row, glyphs.vertical);
        }
        put(self, left, top, glyphs.top_left);
        put(self, right, top, glyphs.top_right);
        put(self, left, bottom, glyphs.bottom_left);
        put(self, right, bottom, glyphs.bottom_right);

        if !title.is_empty() && rect.width > 4 {
            let label = format!(" {} ", truncate(title, rect.width - 4));
            let style = CellStyle {
                bold: true,
                ..edge
            };
            self.put_text(left + 2, top, right, &label, style);
        }
        rect.inner()
    }

    pub fn draw_horizontal_rule(&mut self, x: usize, y: usize, width: usize, role: TextRole) {
        let rule = "─".repeat(width);
        self.draw_text(x, y, &rule, role);
    }

    /// Row glyphs with wide-character continuations removed.
    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        if y >= self.size.height {
            return String::new();
        }
        let start = y * self.size.width;
        self.cells[start..start + self.size.width]
            .iter()
            .map(|cell| cell.glyph)
            .filter(|glyph| *glyph != WIDE_CONTINUATION)
            .collect()
    }

    /// Text-only snapshot for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> String {
        (0..self.size.height)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn color_for_role(&self, role: TextRole) -> TermColor {
        self.theme.color(match role {
            TextRole::Primary => StyleToken::Foreground,
            TextRole::Muted => StyleToken::Muted,
            TextRole::Accent => StyleToken::Accent,
            TextRole::Success => StyleToken::Success,
            TextRole::Danger => StyleToken::Danger,
            TextRole::Focus => StyleToken::Focus,
        })
    }

    #[must_use]
    pub fn style_for_role(&self, role: TextRole) -> CellStyle {
        let typography = self.theme.typography;
        let mut style = CellStyle::plain(
            self.color_for_role(role),
            self.theme.color(StyleToken::Background),
        );
        match role {
            TextRole::Muted => style.dim = typography.muted_dim,
            TextRole::Accent | TextRole::Danger => style.bold = typography.accent_bold,
            TextRole::Focus => {
                style.bold = true;
                style.underline = typography.focus_underline;
            }
            TextRole::Primary | TextRole::Success => {}
        }
        style
    }

    fn put_text(&mut self, x: usize, y: usize, limit: usize, text: &str, style: CellStyle) -> usize {
        if y >= self.size.height {
            return 0;
        }
        let limit = limit.min(self.size.width);
        let mut col = x;
        for glyph in text.chars() {
            let width = glyph.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col + width > limit {
                break;
            }
            self.set_cell(col, y, FrameCell { glyph, style });
            if width == 2 {
                self.set_cell(
                    col + 1,
                    y,
                    FrameCell {
                        glyph: WIDE_CONTINUATION,
                        style,
                    },
                );
            }
            col += width;
        }
        if self.cell(col, y).is_some_and(|cell| cell.glyph == WIDE_CONTINUATION) {
            self.set_cell(col, y, FrameCell { glyph: ' ', style });
        }
        col - x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ThemeKind;

    fn frame(width: usize, height: usize) -> RenderFrame {
        RenderFrame::new(FrameSize { width, height }, ThemeSpec::default())
    }

    #[test]
    fn render_frame_text_snapshot() {
        let mut frame = frame(12, 2);
        frame.draw_text(0, 0, "linkdeck", TextRole::Accent);
        frame.draw_text(0, 1, "ready", TextRole::Muted);
        assert_eq!(frame.snapshot(), "linkdeck    \nready       ");
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut frame = frame(6, 1);
        let written = frame.draw_text(0, 0, "前端go", TextRole::Primary);
        assert_eq!(written, 6);
        assert_eq!(frame.cell(1, 0).map(|c| c.glyph), Some(WIDE_CONTINUATION));
        assert_eq!(frame.row_text(0), "前端go");
    }

    #[test]
    fn wide_glyph_that_does_not_fit_is_dropped() {
        let mut frame = frame(3, 1);
        let written = frame.draw_text(0, 0, "a前端", TextRole::Primary);
        assert_eq!(written, 3);
        assert_eq!(frame.row_text(0), "a前");
    }

    #[test]
    fn focus_role_is_underlined() {
        let mut frame = frame(4, 1);
        frame.draw_text(1, 0, "!", TextRole::Focus);
        let style = frame.cell(1, 0).map(|cell| cell.style);
        assert_eq!(style.map(|s| s.underline), Some(true));
        assert_eq!(style.map(|s| s.fg), Some(frame.color_for_role(TextRole::Focus)));
    }

    #[test]
    fn chip_uses_tag_color_and_fallback() {
        let mut frame = frame(20, 1);
        let color = TermColor::Rgb(0x3b, 0x82, 0xf6);
        let used = frame.draw_chip(0, 0, "go", Some(color), true);
        assert_eq!(used, 4);
        assert_eq!(frame.cell(1, 0).map(|c| c.style.bg), Some(color));
        assert_eq!(frame.cell(1, 0).map(|c| c.style.underline), Some(true));

        frame.draw_chip(5, 0, "adhoc", None, false);
        let fallback = frame.theme().color(StyleToken::ChipFallback);
        assert_eq!(frame.cell(6, 0).map(|c| c.style.bg), Some(fallback));
        assert_eq!(frame.row_text(0), " go   adhoc         ");
    }

    #[test]
    fn panel_snapshot() {
        let mut frame = RenderFrame::new(
            FrameSize {
                width: 10,
                height: 3,
            },
            ThemeSpec::for_kind(ThemeKind::Light),
        );
        let accent = frame.color_for_role(TextRole::Accent);
        let inner = frame.draw_panel(frame.area(), "Tags", BorderStyle::Rounded, accent);
        frame.draw_text_in_rect(inner, 0, 0, "go rust web", TextRole::Primary);
        assert_eq!(
            frame.snapshot(),
            "╭─ Tags ─╮\n│go rust │\n╰────────╯"
        );
        assert_eq!(
            inner,
            Rect {
                x: 1,
                y: 1,
                width: 8,
                height: 1
            }
        );
    }

    #[test]
    fn rect_helpers() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 10,
        };
        let (top, rest) = area.split_vertical(3);
        assert_eq!(top.height, 3);
        assert_eq!(rest.y, 3);
        assert_eq!(rest.height, 7);
        let modal = area.centered(10, 4);
        assert_eq!((modal.x, modal.y), (5, 3));
        assert_eq!(area.shrink(11, 0).width, 0);
    }
}
