//! Plain-text output for the non-interactive subcommands.

use std::fmt::Write as _;

use linkdeck_core::command::Session;
use linkdeck_core::filter::{visible_links, FilterState};
use linkdeck_surface::widgets::{fit, text_width};

/// Links passing every `tags` entry and the `search` term. Tags missing
/// from the display list are named when nothing matches.
#[must_use]
pub fn list_report(session: &Session, tags: &[String], search: Option<&str>) -> String {
    let mut filter = FilterState::default();
    for tag in tags {
        if !filter.selected_tags.contains(tag) {
            filter.toggle(tag);
        }
    }
    if let Some(term) = search {
        filter.set_search_term(term);
    }
    let links = visible_links(&session.state().links, &filter);
    if links.is_empty() {
        let mut out = "No links match the current filters.\n".to_owned();
        let display = &session.derived().display_tags;
        let unknown: Vec<&str> = filter
            .selected_tags
            .iter()
            .filter(|tag| !display.contains(tag))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            let _ = writeln!(out, "Unknown tags: {}", unknown.join(", "));
        }
        return out;
    }

    let mut out = String::new();
    for link in links {
        let _ = writeln!(out, "{}", link.display_title());
        let _ = writeln!(out, "  {}", link.url);
        if let Some(desc) = link.description() {
            let _ = writeln!(out, "  {desc}");
        }
        let tags: Vec<&str> = link
            .tags()
            .iter()
            .map(String::as_str)
            .filter(|tag| !tag.is_empty())
            .collect();
        if !tags.is_empty() {
            let _ = writeln!(out, "  [{}]", tags.join("] ["));
        }
        out.push('\n');
    }
    out
}

/// Display list with colors, `-` for ad-hoc tags.
#[must_use]
pub fn tags_report(session: &Session) -> String {
    let names = &session.derived().display_tags;
    let width = names.iter().map(|name| text_width(name)).max().unwrap_or(0);
    let mut out = String::new();
    for name in names {
        let color = session.tag_color(name).unwrap_or("-");
        let _ = writeln!(out, "{}  {color}", fit(name, width));
    }
    out
}

#[must_use]
pub fn export_report(session: &Session) -> String {
    let mut out = session.export_text().to_owned();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdeck_core::collation::Collation;
    use linkdeck_core::model::{Document, Link, TagDefinition};
    use linkdeck_core::palette::Palette;
    use linkdeck_core::prefs::Theme;
    use linkdeck_core::state::AppState;

    fn session() -> Session {
        let document = Document {
            tags_config: vec![TagDefinition::new("go", "#111111")],
            links: vec![
                Link::new("Alpha", "http://a", "first", vec!["go".into(), "前端".into()]),
                Link::new("Beta", "http://b", "", vec![]),
            ],
        };
        Session::new(
            AppState::from_document(document, Palette::default()),
            Collation::Codepoint,
            Theme::Dark,
        )
    }

    #[test]
    fn list_all_links() {
        assert_eq!(
            list_report(&session(), &[], None),
            "Alpha\n  http://a\n  first\n  [go] [前端]\n\nBeta\n  http://b\n\n"
        );
    }

    #[test]
    fn list_with_filters() {
        let session = session();
        let by_tag = list_report(&session, &["go".to_owned(), "go".to_owned()], None);
        assert!(by_tag.starts_with("Alpha\n"));
        assert!(!by_tag.contains("Beta"));
        assert_eq!(
            list_report(&session, &["missing".to_owned(), "go".to_owned()], None),
            "No links match the current filters.\nUnknown tags: missing\n"
        );
        assert_eq!(
            list_report(&session, &["go".to_owned()], Some("zzz")),
            "No links match the current filters.\n"
        );
        assert!(list_report(&session, &[], Some(" BET ")).starts_with("Beta\n"));
    }

    #[test]
    fn tags_are_aligned() {
        assert_eq!(tags_report(&session()), "go    #111111\n前端  -\n");
    }

    #[test]
    fn export_ends_with_newline() {
        let text = export_report(&session());
        assert!(text.starts_with("{\n"));
        assert!(text.ends_with("}\n"));
    }
}
