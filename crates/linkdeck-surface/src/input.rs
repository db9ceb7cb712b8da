//! Input events independent of the terminal backend.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::none(),
        }
    }

    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers {
                shift: false,
                ctrl: true,
                alt: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(ResizeEvent),
    Tick,
}

/// Navigation-level meaning of an event, shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Noop,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    NextFocus,
    PrevFocus,
    Confirm,
    Cancel,
    Search,
    Refresh,
}

pub trait InputTranslator {
    fn translate(&self, event: &InputEvent) -> UiAction;
}

/// Arrow keys plus vi-style `hjkl`, `Ctrl+K` and `/` for search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultInputTranslator;

impl InputTranslator for DefaultInputTranslator {
    fn translate(&self, event: &InputEvent) -> UiAction {
        let key = match event {
            InputEvent::Key(key) => key,
            InputEvent::Resize(_) | InputEvent::Tick => return UiAction::Refresh,
        };
        if key.modifiers.ctrl {
            return match key.key {
                Key::Char('k') => UiAction::Search,
                _ => UiAction::Noop,
            };
        }
        match key.key {
            Key::Up | Key::Char('k') => UiAction::MoveUp,
            Key::Down | Key::Char('j') => UiAction::MoveDown,
            Key::Left | Key::Char('h') => UiAction::MoveLeft,
            Key::Right | Key::Char('l') => UiAction::MoveRight,
            Key::PageUp => UiAction::PageUp,
            Key::PageDown => UiAction::PageDown,
            Key::Tab => UiAction::NextFocus,
            Key::BackTab => UiAction::PrevFocus,
            Key::Enter | Key::Char(' ') => UiAction::Confirm,
            Key::Escape => UiAction::Cancel,
            Key::Char('/') => UiAction::Search,
            _ => UiAction::Noop,
        }
    }
}

#[must_use]
pub fn translate_input(event: &InputEvent) -> UiAction {
    DefaultInputTranslator.translate(event)
}
