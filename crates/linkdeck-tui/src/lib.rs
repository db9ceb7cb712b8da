//! linkdeck-tui: terminal front end for the linkdeck gallery.
//!
//! [`app::App`] owns the core session plus all view state and turns input
//! events into [`app::Command`]s; [`runtime`] executes those against the
//! real terminal.

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod clipboard;
pub mod config_panel;
pub mod gallery;
pub mod opener;
pub mod report;
pub mod runtime;
pub mod text_input;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "linkdeck-tui"
}

#[cfg(test)]
mod tests {
    #[test]
    fn crate_label_is_stable() {
        assert_eq!(super::crate_label(), "linkdeck-tui");
    }
}
