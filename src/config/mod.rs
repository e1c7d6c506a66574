//! Renderer configuration from `opengraph.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `[excerpt]`   | Description word limit and continuation marker |
//! | `[image]`     | Image rendition used for `og:image`            |
//! | `[namespace]` | Root declaration style and extra prefixes      |
//! | `[metadata]`  | Static extra properties added to every page    |
//!
//! # Example
//!
//! ```toml
//! [excerpt]
//! length = 55
//! more = "…"
//!
//! [image]
//! size = "medium"
//!
//! [namespace]
//! style = "prefix"
//!
//! [namespace.prefixes]
//! fb = "http://ogp.me/ns/fb#"
//!
//! [metadata]
//! "fb:app_id" = "1234"
//! ```
//!
//! A missing file means all defaults.

pub mod defaults;
mod error;
mod excerpt;
mod image;
mod namespace;

pub use error::ConfigError;
pub use excerpt::ExcerptConfig;
pub use image::ImageConfig;
pub use namespace::NamespaceConfig;

use crate::{cli::Cli, property::Metadata};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing opengraph.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OpenGraphConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root (set after loading, default: `./`)
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    /// Description trimming
    #[serde(default)]
    pub excerpt: ExcerptConfig,

    /// `og:image` rendition
    #[serde(default)]
    pub image: ImageConfig,

    /// Namespace declarations
    #[serde(default)]
    pub namespace: NamespaceConfig,

    /// Extra properties emitted on every page, after the core ones
    #[serde(default)]
    pub metadata: Metadata,
}

impl OpenGraphConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: OpenGraphConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        self.root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&self.root.join(&cli.config));

        Self::update_option(&mut self.excerpt.length, cli.excerpt_length.as_ref());
        Self::update_option(&mut self.namespace.style, cli.style.as_ref());
    }

    /// Resolve a user-supplied path against the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.image.size.trim().is_empty() {
            bail!(ConfigError::Validation("[image.size] must not be empty".into()));
        }

        for (prefix, uri) in &self.namespace.prefixes {
            if prefix.is_empty() || prefix.contains(|c: char| c.is_whitespace() || c == ':') {
                bail!(ConfigError::InvalidPrefix(prefix.clone()));
            }
            if uri.trim().is_empty() {
                bail!(ConfigError::EmptyPrefixUri(prefix.clone()));
            }
        }

        if let Some(key) = self.metadata.keys().find(|key| key.trim().is_empty()) {
            bail!(ConfigError::Validation(format!(
                "[metadata] invalid key `{key}`"
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
