//! Command reducer.
//!
//! The shell turns user input into a [`Command`] and hands it to
//! [`Session::dispatch`]. Every successful command runs the full cascade
//! (taxonomy reconcile, filter, export) before returning, so the
//! [`Derived`] view is never stale.

use tracing::{debug, error};

use crate::collation::Collation;
use crate::edit;
use crate::export;
use crate::filter::visible_indices;
use crate::model::Link;
use crate::prefs::Theme;
use crate::state::AppState;
use crate::taxonomy::{self, TagBarEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Flip one display tag in the selection.
    ToggleTag(String),
    /// The "all" pseudo-entry: clears the tag selection.
    ClearTagSelection,
    /// Clears both the tag selection and the search term.
    ClearFilters,
    SetSearchTerm(String),
    /// `color: None` uses the palette's active color.
    UpsertTag {
        name: String,
        color: Option<String>,
    },
    RemoveTagDefinition(String),
    CreateLink {
        title: String,
        url: String,
        desc: String,
        tags: Vec<String>,
    },
    /// Must only be sent after the user confirmed.
    DeleteLink(Link),
    SelectColor(String),
    AddCustomColor(String),
    SetTheme(Theme),
    ToggleTheme,
}

impl Command {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ToggleTag(_) => "toggle-tag",
            Self::ClearTagSelection => "clear-tag-selection",
            Self::ClearFilters => "clear-filters",
            Self::SetSearchTerm(_) => "set-search-term",
            Self::UpsertTag { .. } => "upsert-tag",
            Self::RemoveTagDefinition(_) => "remove-tag-definition",
            Self::CreateLink { .. } => "create-link",
            Self::DeleteLink(_) => "delete-link",
            Self::SelectColor(_) => "select-color",
            Self::AddCustomColor(_) => "add-custom-color",
            Self::SetTheme(_) => "set-theme",
            Self::ToggleTheme => "toggle-theme",
        }
    }
}

/// Side effects the shell performs after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistTheme(Theme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub changed: bool,
    pub effect: Effect,
}

impl Outcome {
    const UNCHANGED: Self = Self {
        changed: false,
        effect: Effect::None,
    };

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            effect: Effect::None,
        }
    }
}

/// Views recomputed from the state after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    pub display_tags: Vec<String>,
    pub tag_bar: Vec<TagBarEntry>,
    /// Indices into `AppState::links`, in collection order.
    pub visible: Vec<usize>,
    pub export_text: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: AppState,
    collation: Collation,
    theme: Theme,
    derived: Derived,
}

impl Session {
    #[must_use]
    pub fn new(state: AppState, collation: Collation, theme: Theme) -> Self {
        let mut session = Self {
            state,
            collation,
            theme,
            derived: Derived::default(),
        };
        session.refresh();
        session
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn collation(&self) -> Collation {
        self.collation
    }

    #[must_use]
    pub fn export_text(&self) -> &str {
        &self.derived.export_text
    }

    /// Visible links in display order.
    pub fn visible_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.derived
            .visible
            .iter()
            .filter_map(|&idx| self.state.links.get(idx))
    }

    #[must_use]
    pub fn visible_link(&self, position: usize) -> Option<&Link> {
        self.derived
            .visible
            .get(position)
            .and_then(|&idx| self.state.links.get(idx))
    }

    #[must_use]
    pub fn tag_color(&self, name: &str) -> Option<&str> {
        taxonomy::color_of(&self.state.tags_config, name)
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let label = command.label();
        let outcome = self.apply(command);
        debug!(command = label, changed = outcome.changed, "dispatched");
        if outcome.changed {
            self.refresh();
        }
        outcome
    }

    fn apply(&mut self, command: Command) -> Outcome {
        let state = &mut self.state;
        match command {
            Command::ToggleTag(name) => {
                if !self.derived.display_tags.iter().any(|tag| *tag == name) {
                    return Outcome::UNCHANGED;
                }
                state.filter.toggle(&name);
                Outcome::changed(true)
            }
            Command::ClearTagSelection => {
                let changed = !state.filter.selected_tags.is_empty();
                state.filter.selected_tags.clear();
                Outcome::changed(changed)
            }
            Command::ClearFilters => {
                let changed = !state.filter.is_empty();
                state.filter.clear();
                Outcome::changed(changed)
            }
            Command::SetSearchTerm(term) => {
                let before = state.filter.search_term.clone();
                state.filter.set_search_term(&term);
                Outcome::changed(before != state.filter.search_term)
            }
            Command::UpsertTag { name, color } => {
                let color = color.unwrap_or_else(|| state.palette.color_for_new_tag().to_owned());
                Outcome::changed(edit::upsert_tag(state, &name, &color))
            }
            Command::RemoveTagDefinition(name) => {
                Outcome::changed(edit::remove_tag_definition(state, &name))
            }
            Command::CreateLink {
                title,
                url,
                desc,
                tags,
            } => Outcome::changed(edit::create_link(state, &title, &url, &desc, tags)),
            Command::DeleteLink(link) => Outcome::changed(edit::delete_link(state, &link)),
            Command::SelectColor(color) => Outcome::changed(state.palette.select(&color)),
            Command::AddCustomColor(color) => Outcome::changed(state.palette.add_custom(&color)),
            Command::SetTheme(theme) => self.set_theme(theme),
            Command::ToggleTheme => self.set_theme(self.theme.toggled()),
        }
    }

    fn set_theme(&mut self, theme: Theme) -> Outcome {
        let changed = self.theme != theme;
        self.theme = theme;
        Outcome {
            changed,
            effect: Effect::PersistTheme(theme),
        }
    }

    // Reconcile must run before filtering or stale selections could hide
    // every link.
    fn refresh(&mut self) {
        let display_tags = taxonomy::display_tags(
            &self.state.tags_config,
            &self.state.links,
            self.collation,
        );
        taxonomy::reconcile(&mut self.state.filter, &display_tags);
        let tag_bar = taxonomy::tag_bar(&self.state.tags_config, &display_tags, &self.state.filter);
        let visible = visible_indices(&self.state.links, &self.state.filter);
        let export_text = match export::export_text(&self.state) {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "export failed");
                String::new()
            }
        };
        self.derived = Derived {
            display_tags,
            tag_bar,
            visible,
            export_text,
        };
    }
}
