//! Taxonomy Manager: reconciles defined tags with the tags links actually
//! use, and keeps the filter selection consistent with the result.

use std::collections::BTreeSet;

use tracing::debug;

use crate::collation::Collation;
use crate::filter::FilterState;
use crate::model::{Link, TagDefinition};

/// Defined and referenced tag names, deduplicated, empty names removed,
/// sorted by `collation`.
#[must_use]
pub fn display_tags(defs: &[TagDefinition], links: &[Link], collation: Collation) -> Vec<String> {
    let unique: BTreeSet<&str> = defs
        .iter()
        .map(|tag| tag.name.as_str())
        .chain(links.iter().flat_map(|link| link.tags().iter().map(String::as_str)))
        .filter(|name| !name.is_empty())
        .collect();
    let mut names: Vec<String> = unique.into_iter().map(str::to_owned).collect();
    collation.sort(&mut names);
    names
}

/// Color of the first definition named exactly `name`.
#[must_use]
pub fn color_of<'a>(defs: &'a [TagDefinition], name: &str) -> Option<&'a str> {
    defs.iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.color.as_str())
}

/// True when `name` is referenced by some link but has no definition.
#[must_use]
pub fn is_ad_hoc(defs: &[TagDefinition], links: &[Link], name: &str) -> bool {
    color_of(defs, name).is_none() && links.iter().any(|link| link.has_tag(name))
}

/// Drops selected tags missing from `display`. Returns how many were dropped.
pub fn reconcile(filter: &mut FilterState, display: &[String]) -> usize {
    let before = filter.selected_tags.len();
    filter
        .selected_tags
        .retain(|tag| display.iter().any(|name| name == tag));
    let dropped = before - filter.selected_tags.len();
    if dropped > 0 {
        debug!(dropped, "pruned stale tag selections");
    }
    dropped
}

/// One entry of the tag filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagBarEntry {
    /// The "all" pseudo-entry; activating it clears the selection.
    All { active: bool },
    Tag {
        name: String,
        color: Option<String>,
        active: bool,
    },
}

impl TagBarEntry {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All { .. })
    }

    #[must_use]
    pub fn active(&self) -> bool {
        match self {
            Self::All { active } | Self::Tag { active, .. } => *active,
        }
    }
}

/// The tag bar: the "all" entry followed by every display tag.
#[must_use]
pub fn tag_bar(defs: &[TagDefinition], display: &[String], filter: &FilterState) -> Vec<TagBarEntry> {
    let mut entries = Vec::with_capacity(display.len() + 1);
    entries.push(TagBarEntry::All {
        active: filter.selected_tags.is_empty(),
    });
    entries.extend(display.iter().map(|name| TagBarEntry::Tag {
        name: name.clone(),
        color: color_of(defs, name).map(str::to_owned),
        active: filter.selected_tags.contains(name),
    }));
    entries
}
