//! Terminal colors and `#hex` parsing for tag colors.

/// Terminal color: ANSI256 index or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermColor {
    Ansi256(u8),
    Rgb(u8, u8, u8),
}

/// What the attached terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    TrueColor,
    Ansi256,
}

impl ColorMode {
    /// Reads a `COLORTERM` value; anything but `truecolor`/`24bit` is 256-color.
    #[must_use]
    pub fn from_colorterm(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "truecolor" || v == "24bit" => Self::TrueColor,
            _ => Self::Ansi256,
        }
    }
}

impl TermColor {
    /// Convert to ANSI256 index (lossy for RGB).
    #[must_use]
    pub fn as_ansi256(self) -> u8 {
        match self {
            Self::Ansi256(idx) => idx,
            Self::Rgb(r, g, b) => rgb_to_ansi256(r, g, b),
        }
    }

    #[must_use]
    pub fn for_mode(self, mode: ColorMode) -> Self {
        match mode {
            ColorMode::TrueColor => self,
            ColorMode::Ansi256 => Self::Ansi256(self.as_ansi256()),
        }
    }

    /// Relative luminance in 0..=1000; `None` for palette indexes.
    #[must_use]
    pub fn luminance(self) -> Option<u32> {
        match self {
            Self::Rgb(r, g, b) => {
                Some((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 255)
            }
            Self::Ansi256(_) => None,
        }
    }

    /// Readable text color on top of `self`.
    #[must_use]
    pub fn contrast_fg(self) -> Self {
        match self.luminance() {
            Some(lum) if lum > 600 => Self::Rgb(17, 24, 39),
            _ => Self::Rgb(255, 255, 255),
        }
    }
}

/// Parses `#RGB` or `#RRGGBB` (case-insensitive). Anything else is `None`.
#[must_use]
pub fn parse_hex(token: &str) -> Option<TermColor> {
    let digits = token.trim().strip_prefix('#')?;
    if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(digits.chars()) {
                let v = ch.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(TermColor::Rgb(out[0], out[1], out[2]))
        }
        6 => Some(TermColor::Rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return (((u16::from(r) - 8) * 24 / 247) as u8) + 232;
    }
    16 + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

fn cube_level(value: u8) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let mut best = 0u8;
    let mut best_dist = u8::MAX;
    for (i, level) in LEVELS.iter().enumerate() {
        let dist = value.abs_diff(*level);
        if dist < best_dist {
            best_dist = dist;
            best = i as u8;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#3B82F6"), Some(TermColor::Rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex("#111"), Some(TermColor::Rgb(0x11, 0x11, 0x11)));
        assert_eq!(parse_hex(" #e5e7eb "), Some(TermColor::Rgb(0xe5, 0xe7, 0xeb)));
    }

    #[test]
    fn rejects_non_hex_tokens() {
        assert_eq!(parse_hex("blue"), None);
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex("3B82F6"), None);
        assert_eq!(parse_hex("#é12"), None);
    }

    #[test]
    fn contrast_prefers_dark_text_on_light_chips() {
        let light = TermColor::Rgb(0xe5, 0xe7, 0xeb);
        let dark = TermColor::Rgb(0x47, 0x55, 0x69);
        assert_eq!(light.contrast_fg(), TermColor::Rgb(17, 24, 39));
        assert_eq!(dark.contrast_fg(), TermColor::Rgb(255, 255, 255));
    }

    #[test]
    fn ansi256_downgrade() {
        assert_eq!(TermColor::Rgb(0, 0, 0).as_ansi256(), 16);
        assert_eq!(TermColor::Rgb(255, 0, 0).as_ansi256(), 196);
        assert_eq!(
            TermColor::Rgb(255, 0, 0).for_mode(ColorMode::Ansi256),
            TermColor::Ansi256(196)
        );
        assert_eq!(ColorMode::from_colorterm(Some("truecolor")), ColorMode::TrueColor);
        assert_eq!(ColorMode::from_colorterm(None), ColorMode::Ansi256);
    }
}
