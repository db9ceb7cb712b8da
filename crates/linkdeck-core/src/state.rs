//! State Store: the one owned record every other component reads or mutates.

use crate::filter::FilterState;
use crate::model::{Document, Link, TagDefinition};
use crate::palette::Palette;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tags_config: Vec<TagDefinition>,
    pub links: Vec<Link>,
    pub filter: FilterState,
    pub palette: Palette,
}

impl AppState {
    #[must_use]
    pub fn from_document(document: Document, palette: Palette) -> Self {
        Self {
            tags_config: document.tags_config,
            links: document.links,
            filter: FilterState::default(),
            palette,
        }
    }

    /// Replace both document fields, keeping filter and palette.
    pub fn replace_document(&mut self, document: Document) {
        self.tags_config = document.tags_config;
        self.links = document.links;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    #[must_use]
    pub fn document(&self) -> Document {
        Document {
            tags_config: self.tags_config.clone(),
            links: self.links.clone(),
        }
    }

    #[must_use]
    pub fn tag_definition(&self, name: &str) -> Option<&TagDefinition> {
        self.tags_config.iter().find(|tag| tag.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trips_through_state() {
        let document = Document {
            tags_config: vec![TagDefinition::new("go", "#111")],
            links: vec![Link::new("A", "http://a", "", vec!["go".into()])],
        };
        let state = AppState::from_document(document.clone(), Palette::default());
        assert_eq!(state.document(), document);
        assert!(state.filter.is_empty());
        assert_eq!(state.tag_definition("go").map(|tag| tag.color.as_str()), Some("#111"));
    }

    #[test]
    fn replace_document_keeps_filter() {
        let mut state = AppState::default();
        state.filter.toggle("go");
        state.replace_document(Document::default());
        assert!(state.filter.selected_tags.contains("go"));
    }
}
