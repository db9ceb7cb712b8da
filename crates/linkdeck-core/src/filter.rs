//! Filter Engine: which links are visible for the current tag selection and
//! search term.

use std::collections::BTreeSet;

use crate::model::Link;

/// Transient filter inputs. Never exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub selected_tags: BTreeSet<String>,
    pub search_term: String,
}

impl FilterState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_tags.is_empty() && self.search_term.is_empty()
    }

    /// Flip membership of `tag` in the selection.
    pub fn toggle(&mut self, tag: &str) {
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_owned());
        }
    }

    /// Stores the trimmed term.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_owned();
    }

    pub fn clear(&mut self) {
        self.selected_tags.clear();
        self.search_term.clear();
    }

    #[must_use]
    pub fn matches(&self, link: &Link) -> bool {
        matches_tags(link, &self.selected_tags) && matches_search(link, &self.search_term)
    }

    #[must_use]
    pub fn active_label(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.selected_tags.is_empty() {
            let tags: Vec<&str> = self.selected_tags.iter().map(String::as_str).collect();
            parts.push(format!("tags:{}", tags.join("+")));
        }
        if !self.search_term.is_empty() {
            parts.push(format!("search:{}", self.search_term));
        }
        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(" ")
        }
    }
}

/// Every selected tag must be on the link. An empty selection passes.
#[must_use]
pub fn matches_tags(link: &Link, selected: &BTreeSet<String>) -> bool {
    selected.iter().all(|tag| link.has_tag(tag))
}

/// Case-insensitive substring match over title, description and tags.
#[must_use]
pub fn matches_search(link: &Link, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    search_haystack(link).contains(&needle)
}

fn search_haystack(link: &Link) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(2 + link.tags().len());
    parts.push(&link.title);
    if let Some(desc) = link.desc_text() {
        parts.push(desc);
    }
    parts.extend(link.tags().iter().map(String::as_str));
    parts.retain(|part| !part.is_empty());
    parts.join(" ").to_lowercase()
}

/// Indices into `links` of the visible entries, in collection order.
#[must_use]
pub fn visible_indices(links: &[Link], filter: &FilterState) -> Vec<usize> {
    links
        .iter()
        .enumerate()
        .filter_map(|(idx, link)| filter.matches(link).then_some(idx))
        .collect()
}

#[must_use]
pub fn visible_links<'a>(links: &'a [Link], filter: &FilterState) -> Vec<&'a Link> {
    links.iter().filter(|link| filter.matches(link)).collect()
}
