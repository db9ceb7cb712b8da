//! Color palette used when defining tags. UI state only; never exported.

pub const DEFAULT_COLORS: [&str; 10] = [
    "#3B82F6", "#6366F1", "#8B5CF6", "#EC4899", "#F97316", "#14B8A6", "#0EA5E9", "#22C55E",
    "#F59E0B", "#475569",
];

/// Color used for a new tag when no palette color is active.
pub const FALLBACK_TAG_COLOR: &str = "#e5e7eb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
    active: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.iter().map(|color| (*color).to_owned()).collect())
    }
}

impl Palette {
    /// Builds a palette; the first color becomes active.
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(colors.len());
        for color in colors {
            let color = color.trim().to_owned();
            if !color.is_empty() && !deduped.contains(&color) {
                deduped.push(color);
            }
        }
        let active = deduped.first().cloned().unwrap_or_default();
        Self {
            colors: deduped,
            active,
        }
    }

    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// The color a tag submitted right now would get.
    #[must_use]
    pub fn color_for_new_tag(&self) -> &str {
        if self.active.is_empty() {
            FALLBACK_TAG_COLOR
        } else {
            &self.active
        }
    }

    /// Make `color` active. Returns false when it is not in the palette.
    pub fn select(&mut self, color: &str) -> bool {
        if !self.colors.iter().any(|candidate| candidate == color) {
            return false;
        }
        self.active = color.to_owned();
        true
    }

    /// Make a free-form color active, appending it for reuse when new.
    pub fn add_custom(&mut self, color: &str) -> bool {
        let color = color.trim();
        if color.is_empty() {
            return false;
        }
        if !self.colors.iter().any(|candidate| candidate == color) {
            self.colors.push(color.to_owned());
        }
        self.active = color.to_owned();
        true
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.colors.iter().position(|color| *color == self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_starts_on_first_color() {
        let palette = Palette::default();
        assert_eq!(palette.colors().len(), 10);
        assert_eq!(palette.active(), "#3B82F6");
        assert_eq!(palette.active_index(), Some(0));
    }

    #[test]
    fn select_requires_known_color() {
        let mut palette = Palette::default();
        assert!(palette.select("#EC4899"));
        assert_eq!(palette.active(), "#EC4899");
        assert!(!palette.select("#000000"));
        assert_eq!(palette.active(), "#EC4899");
    }

    #[test]
    fn custom_colors_are_appended_once() {
        let mut palette = Palette::default();
        assert!(palette.add_custom("#123456"));
        assert!(palette.add_custom("#123456"));
        assert_eq!(palette.colors().len(), 11);
        assert_eq!(palette.active(), "#123456");
        assert!(!palette.add_custom("   "));
    }

    #[test]
    fn empty_palette_falls_back_for_new_tags() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.color_for_new_tag(), FALLBACK_TAG_COLOR);
    }
}
