//! Error types for loading the document and reading configuration.

/// Why the startup load of the document failed. Always terminal for the
/// session: callers show a degraded display and never retry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read {path}: {message}")]
    Io { path: String, message: String },
    #[error("request {url}: {message}")]
    Http { url: String, message: String },
    #[error("request {url}: unexpected status {status}")]
    Status { url: String, status: u16 },
    #[error("parse document: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {message}")]
    Read { path: String, message: String },
    #[error("parse config: {0}")]
    Parse(String),
    #[error("failed to resolve HOME")]
    MissingHome,
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
