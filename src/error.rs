//! Error types for the xpub-markdown library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported node variant: {0}")]
    UnsupportedVariant(String),

    #[error("Malformed rubi: parent {parent:?} with {parts} ruby part(s)")]
    MalformedRubi { parent: String, parts: usize },

    #[error("Missing field `{field}` on {kind} node")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("Unexpected field `{field}` on {kind} node")]
    UnexpectedField { kind: &'static str, field: &'static str },

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
