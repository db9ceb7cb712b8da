//! Border styles and width-aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    Plain,
    #[default]
    Rounded,
    Heavy,
}

/// Box-drawing glyphs for one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderStyle {
    #[must_use]
    pub fn glyphs(self) -> BorderGlyphs {
        let (top_left, top_right, bottom_left, bottom_right, horizontal, vertical) = match self {
            Self::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
            Self::Plain => ('┌', '┐', '└', '┘', '─', '│'),
            Self::Heavy => ('┏', '┓', '┗', '┛', '━', '┃'),
        };
        BorderGlyphs {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            horizontal,
            vertical,
        }
    }
}

/// Display width in terminal columns.
#[must_use]
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate to at most `max_cols` columns, ending in `…` when cut.
#[must_use]
pub fn truncate(input: &str, max_cols: usize) -> String {
    if max_cols == 0 {
        return String::new();
    }
    if text_width(input) <= max_cols {
        return input.to_owned();
    }
    let budget = max_cols - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in input.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('\u{2026}');
    out
}

/// Pad with spaces (or truncate) to exactly `cols` columns.
#[must_use]
pub fn fit(input: &str, cols: usize) -> String {
    let mut out = truncate(input, cols);
    let width = text_width(&out);
    out.push_str(&" ".repeat(cols.saturating_sub(width)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_basic() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell\u{2026}");
        assert_eq!(truncate("ab", 1), "\u{2026}");
        assert_eq!(truncate("ab", 0), "");
    }

    #[test]
    fn truncate_counts_wide_glyphs_twice() {
        assert_eq!(text_width("前端"), 4);
        assert_eq!(truncate("前端工具", 5), "前端\u{2026}");
        assert_eq!(truncate("前端工具", 4), "前\u{2026}");
    }

    #[test]
    fn fit_pads_to_width() {
        assert_eq!(fit("go", 4), "go  ");
        assert_eq!(fit("前", 3), "前 ");
        assert_eq!(fit("abcdef", 3), "ab\u{2026}");
    }

    #[test]
    fn border_glyph_sets() {
        assert_eq!(BorderStyle::Rounded.glyphs().top_left, '╭');
        assert_eq!(BorderStyle::Heavy.glyphs().vertical, '┃');
    }
}
