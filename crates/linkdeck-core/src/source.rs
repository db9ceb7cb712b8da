//! Where the document comes from: a local file or an HTTP(S) URL.
//!
//! A session fetches exactly once. Any failure is reported to the caller as
//! a [`LoadError`] and never retried.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::document::parse_document;
use crate::error::LoadError;
use crate::model::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http(String),
}

impl DataSource {
    /// `http://` and `https://` (any case) are URLs, anything else a path.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let trimmed = spec.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Raw document text.
    pub fn fetch(&self, timeout: Duration) -> Result<String, LoadError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|err| LoadError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            }),
            Self::Http(url) => fetch_http(url, timeout),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

/// Fetch and coerce the document.
pub fn load_document(source: &DataSource, timeout: Duration) -> Result<Document, LoadError> {
    let raw = source.fetch(timeout).inspect_err(|err| {
        warn!(source = %source, error = %err, "document load failed");
    })?;
    let document = parse_document(&raw)?;
    info!(
        source = %source,
        tags = document.tags_config.len(),
        links = document.links.len(),
        "document loaded"
    );
    Ok(document)
}

/// Appends `v=<millis>` so intermediaries never serve a stale copy.
#[must_use]
pub fn cache_busted_url(url: &str, millis: i64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{separator}v={millis}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

fn fetch_http(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let http_error = |err: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        message: err.to_string(),
    };
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http_error)?;
    let target = cache_busted_url(url, Utc::now().timestamp_millis());
    let resp = client.get(&target).send().map_err(http_error)?;
    if !resp.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    resp.text().map_err(http_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DataSource::parse(" https://x.test/data.json "),
            DataSource::Http("https://x.test/data.json".into())
        );
        assert_eq!(
            DataSource::parse("HTTP://x.test"),
            DataSource::Http("HTTP://x.test".into())
        );
        assert_eq!(
            DataSource::parse("./data.json"),
            DataSource::File(PathBuf::from("./data.json"))
        );
    }

    #[test]
    fn cache_buster_picks_separator() {
        assert_eq!(cache_busted_url("http://a/d.json", 42), "http://a/d.json?v=42");
        assert_eq!(
            cache_busted_url("http://a/d.json?x=1", 42),
            "http://a/d.json?x=1&v=42"
        );
        assert_eq!(
            cache_busted_url("http://a/d.json#top", 7),
            "http://a/d.json?v=7#top"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = DataSource::parse("/nonexistent/linkdeck/data.json");
        let err = load_document(&source, Duration::from_millis(10)).err();
        assert!(matches!(err, Some(LoadError::Io { .. })));
    }
}
