//! Light and dark themes.

use crate::color::TermColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Background,
    Surface,
    Foreground,
    Muted,
    Accent,
    Success,
    Danger,
    Focus,
    /// Chip background for tags without a definition.
    ChipFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: TermColor,
    pub surface: TermColor,
    pub foreground: TermColor,
    pub muted: TermColor,
    pub accent: TermColor,
    pub success: TermColor,
    pub danger: TermColor,
    pub focus: TermColor,
    pub chip_fallback: TermColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypographySpec {
    pub accent_bold: bool,
    pub muted_dim: bool,
    pub focus_underline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSpec {
    pub kind: ThemeKind,
    pub palette: Palette,
    pub typography: TypographySpec,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self::for_kind(ThemeKind::default())
    }
}

impl ThemeSpec {
    #[must_use]
    pub fn for_kind(kind: ThemeKind) -> Self {
        let palette = match kind {
            ThemeKind::Light => Palette {
                background: TermColor::Rgb(0xf8, 0xfa, 0xfc),
                surface: TermColor::Rgb(0xff, 0xff, 0xff),
                foreground: TermColor::Rgb(0x0f, 0x17, 0x2a),
                muted: TermColor::Rgb(0x64, 0x74, 0x8b),
                accent: TermColor::Rgb(0x3b, 0x82, 0xf6),
                success: TermColor::Rgb(0x16, 0xa3, 0x4a),
                danger: TermColor::Rgb(0xdc, 0x26, 0x26),
                focus: TermColor::Rgb(0x63, 0x66, 0xf1),
                chip_fallback: TermColor::Rgb(0xe5, 0xe7, 0xeb),
            },
            ThemeKind::Dark => Palette {
                background: TermColor::Rgb(0x0b, 0x11, 0x20),
                surface: TermColor::Rgb(0x11, 0x18, 0x27),
                foreground: TermColor::Rgb(0xe5, 0xe7, 0xeb),
                muted: TermColor::Rgb(0x94, 0xa3, 0xb8),
                accent: TermColor::Rgb(0x60, 0xa5, 0xfa),
                success: TermColor::Rgb(0x22, 0xc5, 0x5e),
                danger: TermColor::Rgb(0xf8, 0x71, 0x71),
                focus: TermColor::Rgb(0xa5, 0xb4, 0xfc),
                chip_fallback: TermColor::Rgb(0x37, 0x41, 0x51),
            },
        };
        let typography = TypographySpec {
            accent_bold: true,
            muted_dim: kind == ThemeKind::Dark,
            focus_underline: true,
        };
        Self {
            kind,
            palette,
            typography,
        }
    }

    #[must_use]
    pub fn color(self, token: StyleToken) -> TermColor {
        match token {
            StyleToken::Background => self.palette.background,
            StyleToken::Surface => self.palette.surface,
            StyleToken::Foreground => self.palette.foreground,
            StyleToken::Muted => self.palette.muted,
            StyleToken::Accent => self.palette.accent,
            StyleToken::Success => self.palette.success,
            StyleToken::Danger => self.palette.danger,
            StyleToken::Focus => self.palette.focus,
            StyleToken::ChipFallback => self.palette.chip_fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_dark() {
        let theme = ThemeSpec::default();
        assert_eq!(theme.kind, ThemeKind::Dark);
        assert!(theme.typography.muted_dim);
    }

    #[test]
    fn light_theme_has_light_background() {
        let theme = ThemeSpec::for_kind(ThemeKind::Light);
        let bg = theme.color(StyleToken::Background).luminance();
        let fg = theme.color(StyleToken::Foreground).luminance();
        assert!(bg > fg);
        assert_eq!(theme.color(StyleToken::Accent), TermColor::Rgb(0x3b, 0x82, 0xf6));
    }
}
