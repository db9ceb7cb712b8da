//! linkdeck-core: document model, filtering, taxonomy and the edit/export
//! pipeline behind the linkdeck gallery.
//!
//! Nothing in this crate touches the terminal. The TUI crate feeds
//! [`command::Command`]s into a [`command::Session`] and renders the
//! [`command::Derived`] view it gets back.

pub mod collation;
pub mod command;
pub mod config;
pub mod document;
pub mod edit;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod palette;
pub mod prefs;
pub mod source;
pub mod state;
pub mod taxonomy;
pub mod telemetry;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "linkdeck-core"
}
