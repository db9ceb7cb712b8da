//! Lenient decoding of the `{tags_config, links}` document.
//!
//! Only malformed JSON fails a load. Shape problems are coerced: a field
//! that is not an array becomes an empty list, mistyped fields inside an
//! entry decode leniently, and only entries that are not objects are skipped.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::model::{Document, Link, TagDefinition};

pub fn parse_document(raw: &str) -> Result<Document, LoadError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| LoadError::Parse(err.to_string()))?;
    Ok(coerce_document(value))
}

#[must_use]
pub fn coerce_document(value: Value) -> Document {
    let Value::Object(mut root) = value else {
        warn!(kind = value_kind(&value), "document is not an object; using empty document");
        return Document::default();
    };
    let tags_config = coerce_entries::<TagDefinition>(root.remove("tags_config"), "tags_config");
    let links = coerce_entries::<Link>(root.remove("links"), "links");
    if !root.is_empty() {
        debug!(dropped = root.len(), "ignoring unknown document fields");
    }
    Document { tags_config, links }
}

fn coerce_entries<T: DeserializeOwned>(value: Option<Value>, field: &'static str) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(field, index, error = %err, "skipping malformed entry");
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(field, kind = value_kind(&other), "expected an array; using empty list");
            Vec::new()
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Document {
        match parse_document(raw) {
            Ok(doc) => doc,
            Err(err) => panic!("parse: {err}"),
        }
    }

    #[test]
    fn well_formed_document_decodes() {
        let doc = parse(
            r##"{"tags_config":[{"name":"go","color":"#111"}],
                "links":[{"title":"A","url":"http://a","desc":"","tags":["go"]}]}"##,
        );
        assert_eq!(doc.tags_config, vec![TagDefinition::new("go", "#111")]);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].tags().to_vec(), vec!["go".to_owned()]);
    }

    #[test]
    fn non_array_fields_become_empty() {
        let doc = parse(r#"{"tags_config":{"name":"go"},"links":"nope"}"#);
        assert!(doc.tags_config.is_empty());
        assert!(doc.links.is_empty());
    }

    #[test]
    fn missing_fields_become_empty() {
        let doc = parse("{}");
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn non_object_document_is_empty() {
        assert_eq!(parse("[1, 2, 3]"), Document::default());
        assert_eq!(parse("null"), Document::default());
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let doc = parse(
            r#"{"links":[42, {"title":"A","url":"http://a"}, {"title":7}],
                "tags_config":["go", {"name":"rust","color":"red"}, {"name":3}]}"#,
        );
        assert_eq!(doc.links.len(), 2);
        assert_eq!(doc.links[0].title, "A");
        assert_eq!(doc.links[1].title, "7");
        assert_eq!(
            doc.tags_config,
            vec![TagDefinition::new("rust", "red"), TagDefinition::new("3", "")]
        );
    }

    #[test]
    fn every_object_entry_is_kept_with_its_nulls() {
        let doc = parse(
            r#"{"links":[
                {"title":"A","url":"http://a","desc":null,"tags":["go"]},
                {"title":"B","url":"http://b","desc":"","tags":["go",7]},
                {"title":"C","url":"http://c","tags":null}]}"#,
        );
        let titles: Vec<&str> = doc.links.iter().map(|link| link.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(doc.links[1].tags(), ["go".to_owned(), "7".to_owned()]);

        let exported = match serde_json::to_value(&doc) {
            Ok(value) => value,
            Err(err) => panic!("encode: {err}"),
        };
        assert!(exported["links"][0]["desc"].is_null());
        assert!(exported["links"][0].get("desc").is_some());
        assert!(exported["links"][2]["tags"].is_null());
        assert!(exported["links"][2].get("tags").is_some());
        assert!(exported["links"][2].get("desc").is_none());
    }

    #[test]
    fn invalid_json_fails() {
        assert!(matches!(parse_document("{"), Err(LoadError::Parse(_))));
    }
}
