//! Namespace/prefix declarations for the root `<html>` element.
//!
//! # Styles
//!
//! | Style    | Output                                          |
//! |----------|-------------------------------------------------|
//! | `prefix` | `prefix="og: http://ogp.me/ns# profile: ..."`   |
//! | `xmlns`  | `xmlns:og="http://opengraphprotocol.org/schema/"` |
//!
//! An existing `prefix` attribute is merged into rather than duplicated:
//!
//! ```text
//! lang="en" prefix="fb: http://ogp.me/ns/fb#"
//!     ▼
//! lang="en" prefix="og: http://ogp.me/ns# fb: http://ogp.me/ns/fb#"
//! ```

use crate::{hooks::Scope, render::escape_attr};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::LazyLock};

/// Open Graph vocabulary URI.
pub const OG_NS: &str = "http://ogp.me/ns#";

/// Open Graph URI used with `xmlns:og`.
pub const LEGACY_OG_NS: &str = "http://opengraphprotocol.org/schema/";

/// Profile vocabulary URI.
pub const PROFILE_NS: &str = "http://ogp.me/ns/profile#";

static RE_PREFIX_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)prefix\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static RE_XMLNS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)xmlns:([^\s=]+)\s*=").unwrap());

/// How namespaces are advertised on the root element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceStyle {
    /// RDFa `prefix="og: uri"`.
    #[default]
    Prefix,
    /// `xmlns:og="uri"` attributes.
    Xmlns,
}

impl NamespaceStyle {
    /// URI bound to `og` in this style.
    pub const fn og_uri(self) -> &'static str {
        match self {
            Self::Prefix => OG_NS,
            Self::Xmlns => LEGACY_OG_NS,
        }
    }
}

/// Ordered prefix -> URI table. Each prefix is declared at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefixes(IndexMap<String, String>);

impl Prefixes {
    /// Table holding only the `og` prefix.
    pub fn base(style: NamespaceStyle) -> Self {
        let mut prefixes = Self::default();
        prefixes.declare("og", style.og_uri());
        prefixes
    }

    /// Add a prefix unless it is already declared.
    pub fn declare(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.0.entry(prefix.into()).or_insert_with(|| uri.into());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.0.shift_remove(prefix)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the prefix table for the current page: base, config, then hooks.
pub fn collect(scope: &Scope<'_>) -> Prefixes {
    let namespace = &scope.config.namespace;
    let mut prefixes = Prefixes::base(namespace.style);
    for (prefix, uri) in &namespace.prefixes {
        prefixes.declare(prefix.as_str(), uri.as_str());
    }
    scope.hooks.prefixes.apply(prefixes, scope)
}

/// Decorate a root attribute string with the declarations.
pub fn declare(attrs: &str, prefixes: &Prefixes, style: NamespaceStyle) -> String {
    match style {
        NamespaceStyle::Prefix => declare_prefix(attrs, prefixes),
        NamespaceStyle::Xmlns => declare_xmlns(attrs, prefixes),
    }
}

fn declare_prefix(attrs: &str, prefixes: &Prefixes) -> String {
    let Some(value) = RE_PREFIX_ATTR
        .captures(attrs)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
    else {
        if prefixes.is_empty() {
            return attrs.to_owned();
        }
        return append_attr(attrs, &format!("prefix=\"{}\"", prefix_list(prefixes.iter())));
    };

    let existing = value.as_str().trim();
    let declared = declared_prefixes(existing);
    let missing = prefix_list(prefixes.iter().filter(|(p, _)| !declared.contains(p)));
    if missing.is_empty() {
        return attrs.to_owned();
    }

    let merged = if existing.is_empty() {
        missing
    } else {
        format!("{missing} {existing}")
    };
    format!("{}{merged}{}", &attrs[..value.start()], &attrs[value.end()..])
}

fn declare_xmlns(attrs: &str, prefixes: &Prefixes) -> String {
    let declared: HashSet<String> = RE_XMLNS_ATTR
        .captures_iter(attrs)
        .map(|caps| caps[1].to_ascii_lowercase())
        .collect();

    let mut out = attrs.to_owned();
    for (prefix, uri) in prefixes.iter() {
        if declared.contains(&prefix.to_ascii_lowercase()) {
            continue;
        }
        out = append_attr(
            &out,
            &format!("xmlns:{}=\"{}\"", escape_attr(prefix), escape_attr(uri)),
        );
    }
    out
}

/// `og: uri profile: uri`
fn prefix_list<'a>(prefixes: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    prefixes
        .map(|(prefix, uri)| format!("{}: {}", escape_attr(prefix), escape_attr(uri)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix names in an RDFa prefix value (`name:` tokens).
fn declared_prefixes(value: &str) -> HashSet<&str> {
    value
        .split_whitespace()
        .filter_map(|token| token.strip_suffix(':'))
        .filter(|name| !name.is_empty())
        .collect()
}

fn append_attr(attrs: &str, attr: &str) -> String {
    let attrs = attrs.trim_end();
    if attrs.is_empty() {
        attr.to_owned()
    } else {
        format!("{attrs} {attr}")
    }
}

// ============================================================================
// Tests
// ============================================================================
