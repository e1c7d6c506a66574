//! `[image]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[image]` section in opengraph.toml.
///
/// # Example
/// ```toml
/// [image]
/// size = "large"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Named rendition used for `og:image` URLs (default: `medium`).
    /// Attachments without that rendition fall back to their full URL.
    #[serde(default = "defaults::image::size")]
    #[educe(Default = defaults::image::size())]
    pub size: String,
}
