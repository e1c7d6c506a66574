//! Context snapshot loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a [`Snapshot`](super::Snapshot).
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Context file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Context file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported context format `{0}` (expected .toml or .json)")]
    Format(PathBuf),
}
