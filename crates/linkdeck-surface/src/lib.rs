//! linkdeck-surface: terminal-agnostic drawing surface for the gallery.
//!
//! App code renders into a [`render::RenderFrame`] cell grid and reads
//! [`input::InputEvent`]s; only the runtime touches the real terminal.

pub mod color;
pub mod input;
pub mod render;
pub mod snapshot;
pub mod style;
pub mod widgets;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "linkdeck-surface"
}
