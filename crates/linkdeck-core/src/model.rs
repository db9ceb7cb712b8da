//! Document entities: tag definitions, links and the exported document shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for links without a description. Render-time only.
pub const DESC_PLACEHOLDER: &str = "No description";

/// Placeholder shown for links without a title. Render-time only.
pub const TITLE_PLACEHOLDER: &str = "Untitled link";

/// A named, colored label. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: String,
}

impl TagDefinition {
    #[must_use]
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_owned(),
            color: color.to_owned(),
        }
    }
}

/// A bookmarked link.
///
/// `desc` and `tags` distinguish a missing key (`None`) from an explicit
/// `null` (`Some(None)`) so an entry exports with the keys it arrived with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(
        default,
        deserialize_with = "lenient_desc",
        skip_serializing_if = "Option::is_none"
    )]
    pub desc: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Option<Vec<String>>>,
}

impl Link {
    #[must_use]
    pub fn new(title: &str, url: &str, desc: &str, tags: Vec<String>) -> Self {
        Self {
            title: title.to_owned(),
            url: url.to_owned(),
            desc: Some(Some(desc.to_owned())),
            tags: Some(Some(tags)),
        }
    }

    /// Tag names on this link; a missing or null list reads as empty.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_ref().and_then(Option::as_deref).unwrap_or(&[])
    }

    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags().iter().any(|tag| tag == name)
    }

    /// Raw description text, empty included.
    #[must_use]
    pub fn desc_text(&self) -> Option<&str> {
        self.desc.as_ref().and_then(Option::as_deref)
    }

    /// Description, or `None` when missing, null or empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.desc_text().filter(|desc| !desc.is_empty())
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            TITLE_PLACEHOLDER
        } else {
            &self.title
        }
    }

    #[must_use]
    pub fn display_desc(&self) -> &str {
        self.description().unwrap_or(DESC_PLACEHOLDER)
    }
}

/// The `{tags_config, links}` document, both the load and the export shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tags_config: Vec<TagDefinition>,
    #[serde(default)]
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

// Scalars read as their text; anything else as empty.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn lenient_desc<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(match value {
        Value::Null => None,
        other => Some(scalar_text(&other).unwrap_or_default()),
    }))
}

// A non-array list becomes empty; scalar entries keep their text.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Option<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(match value {
        Value::Null => None,
        Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
        _ => Some(Vec::new()),
    }))
}
