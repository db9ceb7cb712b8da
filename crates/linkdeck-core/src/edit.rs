//! Edit half of the Edit/Export Pipeline.
//!
//! Every operation returns whether it changed the state. Invalid input is a
//! silent no-op; callers decide what, if anything, to tell the user.

use tracing::info;

use crate::model::{Link, TagDefinition};
use crate::state::AppState;

/// Create a tag definition, or overwrite the color of the existing one with
/// the same (trimmed) name.
pub fn upsert_tag(state: &mut AppState, name: &str, color: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    match state.tags_config.iter_mut().find(|tag| tag.name == name) {
        Some(existing) => {
            existing.color = color.to_owned();
            info!(tag = name, color, "updated tag color");
        }
        None => {
            state.tags_config.push(TagDefinition::new(name, color));
            info!(tag = name, color, "defined tag");
        }
    }
    true
}

/// Remove the formal definition of `name`. Links keep the name, so a tag
/// still in use lives on as an ad-hoc tag.
pub fn remove_tag_definition(state: &mut AppState, name: &str) -> bool {
    let Some(idx) = state.tags_config.iter().position(|tag| tag.name == name) else {
        return false;
    };
    state.tags_config.remove(idx);
    info!(tag = name, "removed tag definition");
    true
}

/// Prepend a new link. Title and url are required after trimming.
pub fn create_link(state: &mut AppState, title: &str, url: &str, desc: &str, tags: Vec<String>) -> bool {
    let title = title.trim();
    let url = url.trim();
    if title.is_empty() || url.is_empty() {
        return false;
    }
    state
        .links
        .insert(0, Link::new(title, url, desc.trim(), tags));
    info!(title, url, "created link");
    true
}

/// Remove the first link structurally equal to `target`.
///
/// Performs no confirmation; callers gate this behind one.
pub fn delete_link(state: &mut AppState, target: &Link) -> bool {
    let Some(idx) = state.links.iter().position(|link| link == target) else {
        return false;
    };
    let removed = state.links.remove(idx);
    info!(title = %removed.title, url = %removed.url, "deleted link");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;
    use crate::palette::Palette;

    fn state() -> AppState {
        AppState::from_document(
            Document {
                tags_config: vec![TagDefinition::new("go", "#111")],
                links: vec![
                    Link::new("A", "http://a", "", vec!["go".into()]),
                    Link::new("B", "http://b", "", vec![]),
                ],
            },
            Palette::default(),
        )
    }

    #[test]
    fn upsert_overwrites_existing_color() {
        let mut state = state();
        assert!(upsert_tag(&mut state, "go", "#222"));
        assert_eq!(state.tags_config, vec![TagDefinition::new("go", "#222")]);
    }

    #[test]
    fn upsert_appends_new_trimmed_name() {
        let mut state = state();
        assert!(upsert_tag(&mut state, "  rust ", "#333"));
        assert_eq!(state.tags_config.len(), 2);
        assert_eq!(state.tags_config[1], TagDefinition::new("rust", "#333"));
    }

    #[test]
    fn upsert_ignores_blank_name() {
        let mut state = state();
        assert!(!upsert_tag(&mut state, "   ", "#333"));
        assert_eq!(state.tags_config.len(), 1);
    }

    #[test]
    fn create_link_prepends() {
        let mut state = state();
        assert!(create_link(&mut state, " C ", " http://c ", " third ", vec!["go".into()]));
        assert_eq!(state.links.len(), 3);
        assert_eq!(
            state.links[0],
            Link::new("C", "http://c", "third", vec!["go".into()])
        );
    }

    #[test]
    fn create_link_requires_title_and_url() {
        let mut state = state();
        let before = state.links.clone();
        assert!(!create_link(&mut state, "", "http://x", "", vec![]));
        assert!(!create_link(&mut state, "X", "  ", "", vec![]));
        assert_eq!(state.links, before);
    }

    #[test]
    fn delete_link_removes_first_structural_match_only() {
        let mut state = state();
        let dup = Link::new("B", "http://b", "", vec![]);
        state.links.push(dup.clone());
        assert!(delete_link(&mut state, &dup));
        assert_eq!(state.links.len(), 2);
        assert_eq!(state.links[0].title, "A");
        assert_eq!(state.links[1], dup);
    }

    #[test]
    fn delete_missing_link_is_noop() {
        let mut state = state();
        let stranger = Link::new("Z", "http://z", "", vec![]);
        assert!(!delete_link(&mut state, &stranger));
        assert_eq!(state.links.len(), 2);
    }

    #[test]
    fn removing_definition_keeps_link_tags() {
        let mut state = state();
        assert!(remove_tag_definition(&mut state, "go"));
        assert!(state.tags_config.is_empty());
        assert!(state.links[0].has_tag("go"));
        assert!(!remove_tag_definition(&mut state, "go"));
    }
}
