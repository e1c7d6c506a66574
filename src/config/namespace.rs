//! `[namespace]` section configuration.
//!
//! Controls how vocabularies are declared on the root `<html>` element.

use super::defaults;
use crate::namespace::NamespaceStyle;
use educe::Educe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `[namespace]` section in opengraph.toml.
///
/// # Example
/// ```toml
/// [namespace]
/// style = "xmlns"          # or "prefix" (default)
/// inline_fallback = false  # never put declarations on <meta> tags
///
/// [namespace.prefixes]
/// fb = "http://ogp.me/ns/fb#"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Declaration style.
    #[serde(default)]
    pub style: NamespaceStyle,

    /// Declare the namespace on every `<meta>` tag when the root element
    /// was never decorated.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub inline_fallback: bool,

    /// Extra prefixes declared after `og`, in file order.
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,
}
