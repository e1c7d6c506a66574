//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or validating `opengraph.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse opengraph.toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Prefix names end up as `name:` tokens in `prefix="..."` and as
    /// `xmlns:name` attributes.
    #[error("[namespace.prefixes] invalid prefix `{0}`: must be non-empty, without whitespace or `:`")]
    InvalidPrefix(String),

    #[error("[namespace.prefixes.{0}] URI must not be empty")]
    EmptyPrefixUri(String),

    #[error("Config validation error: {0}")]
    Validation(String),
}
