use linkdeck_surface::input::{Key, KeyEvent};

/// Cursor glyph drawn after a focused text field.
pub const CURSOR: char = '\u{258f}';

/// Apply a typing key to `buffer`. Returns true when the key was consumed.
pub fn apply_text_key(buffer: &mut String, key: KeyEvent) -> bool {
    if key.modifiers.ctrl || key.modifiers.alt {
        if key.modifiers.ctrl && key.key == Key::Char('u') {
            buffer.clear();
            return true;
        }
        return false;
    }
    match key.key {
        Key::Char(ch) => {
            buffer.push(ch);
            true
        }
        Key::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// `label: value` with a cursor when focused.
#[must_use]
pub fn field_line(label: &str, value: &str, focused: bool) -> String {
    if focused {
        format!("{label}: {value}{CURSOR}")
    } else {
        format!("{label}: {value}")
    }
}
