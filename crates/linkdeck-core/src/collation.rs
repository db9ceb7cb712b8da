//! Locale-parameterized ordering for the tag display list.

use std::cmp::Ordering;

use pinyin::ToPinyin;

/// Default locale for tag ordering.
pub const DEFAULT_LOCALE: &str = "zh-Hans";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    /// Chinese ordering: Han characters by pinyin, ahead of other scripts.
    #[default]
    Pinyin,
    /// Case-folded comparison; lowercase wins ties.
    CaseInsensitive,
    /// Raw code point order.
    Codepoint,
}

impl Collation {
    /// Picks a collation for a BCP 47-ish locale tag.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        let normalized = locale.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "c" | "posix" | "codepoint" => Self::Codepoint,
            tag if tag == "zh" || tag.starts_with("zh-") => Self::Pinyin,
            _ => Self::CaseInsensitive,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pinyin => "pinyin",
            Self::CaseInsensitive => "case-insensitive",
            Self::Codepoint => "codepoint",
        }
    }

    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Codepoint => a.cmp(b),
            Self::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| lowercase_first(a, b))
                .then_with(|| a.cmp(b)),
            Self::Pinyin => pinyin_key(a)
                .cmp(&pinyin_key(b))
                .then_with(|| lowercase_first(a, b))
                .then_with(|| a.cmp(b)),
        }
    }

    pub fn sort(self, names: &mut [String]) {
        names.sort_by(|a, b| self.compare(a, b));
    }
}

// Tertiary level: at the first position where case differs, lowercase sorts
// ahead.
fn lowercase_first(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase))
}

// Per-character key: (script group, folded text). Groups order punctuation,
// then digits, then Han, then every other letter.
fn pinyin_key(text: &str) -> Vec<(u8, String)> {
    text.chars()
        .map(|ch| {
            if let Some(reading) = ch.to_pinyin() {
                (2, reading.plain().to_owned())
            } else if ch.is_alphabetic() {
                (3, ch.to_lowercase().collect())
            } else if ch.is_numeric() {
                (1, ch.to_string())
            } else {
                (0, ch.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(collation: Collation, names: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = names.iter().map(|name| (*name).to_owned()).collect();
        collation.sort(&mut out);
        out
    }

    #[test]
    fn locale_mapping() {
        assert_eq!(Collation::for_locale("zh-Hans"), Collation::Pinyin);
        assert_eq!(Collation::for_locale("zh_CN"), Collation::Pinyin);
        assert_eq!(Collation::for_locale("C"), Collation::Codepoint);
        assert_eq!(Collation::for_locale("en-US"), Collation::CaseInsensitive);
        assert_eq!(Collation::for_locale(""), Collation::CaseInsensitive);
    }

    #[test]
    fn pinyin_orders_han_by_reading() {
        // 北 (bei) < 猫 (mao) < 中 (zhong), regardless of code point order.
        assert_eq!(
            sorted(Collation::Pinyin, &["中", "猫", "北"]),
            vec!["北", "猫", "中"]
        );
    }

    #[test]
    fn pinyin_places_han_before_latin() {
        assert_eq!(
            sorted(Collation::Pinyin, &["rust", "工具", "Go"]),
            vec!["工具", "Go", "rust"]
        );
    }

    #[test]
    fn case_insensitive_ignores_case() {
        assert_eq!(
            sorted(Collation::CaseInsensitive, &["b", "A", "a", "C"]),
            vec!["a", "A", "b", "C"]
        );
    }

    #[test]
    fn pinyin_puts_lowercase_first_on_case_ties() {
        assert_eq!(
            sorted(Collation::Pinyin, &["B", "A", "b", "a"]),
            vec!["a", "A", "b", "B"]
        );
        assert_eq!(
            sorted(Collation::Pinyin, &["Go", "go", "gO"]),
            vec!["go", "gO", "Go"]
        );
    }

    #[test]
    fn codepoint_is_raw_order() {
        assert_eq!(
            sorted(Collation::Codepoint, &["b", "a", "C"]),
            vec!["C", "a", "b"]
        );
    }
}
