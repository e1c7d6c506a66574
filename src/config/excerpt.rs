//! `[excerpt]` section configuration.
//!
//! Controls how descriptions are cut down from post content and bios.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[excerpt]` section in opengraph.toml.
///
/// # Example
/// ```toml
/// [excerpt]
/// length = 30     # words kept before cutting
/// more = " [...]" # appended only when something was cut
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ExcerptConfig {
    /// Maximum number of words (default: 55).
    #[serde(default = "defaults::excerpt::length")]
    #[educe(Default = defaults::excerpt::length())]
    pub length: usize,

    /// Continuation marker (default: `…`).
    #[serde(default = "defaults::excerpt::more")]
    #[educe(Default = defaults::excerpt::more())]
    pub more: String,
}
