//! Markup output for one page render.
//!
//! [`Render`] is created per request by [`OpenGraph::render`](crate::OpenGraph::render)
//! and carries the only mutable state of a render: whether the namespace has
//! already been declared on the root element.
//!
//! ```ignore
//! let mut render = og.render(&snapshot, &snapshot);
//! let attrs = render.language_attributes(r#"lang="en""#); // once per page
//! let tags = render.meta_tags();                          // in <head>
//! ```

use crate::{
    hooks::Scope,
    metadata,
    namespace::{self, Prefixes},
    property::Metadata,
};
use std::borrow::Cow;

/// Render-scoped state.
pub struct Render<'a> {
    scope: Scope<'a>,
    namespace_declared: bool,
}

impl<'a> Render<'a> {
    pub fn new(scope: Scope<'a>) -> Self {
        Self {
            scope,
            namespace_declared: false,
        }
    }

    pub const fn scope(&self) -> &Scope<'a> {
        &self.scope
    }

    /// Prefix table for this page.
    pub fn prefixes(&self) -> Prefixes {
        namespace::collect(&self.scope)
    }

    /// Add namespace declarations to the root element's attribute string.
    ///
    /// Only the first call decorates; later calls return `attrs` unchanged.
    pub fn language_attributes(&mut self, attrs: &str) -> String {
        if self.namespace_declared {
            return attrs.to_owned();
        }
        self.namespace_declared = true;
        namespace::declare(attrs, &self.prefixes(), self.scope.config.namespace.style)
    }

    pub const fn is_namespace_declared(&self) -> bool {
        self.namespace_declared
    }

    /// Resolved metadata table.
    pub fn metadata(&self) -> Metadata {
        metadata::collect(&self.scope)
    }

    /// `<meta>` tags for the page head.
    ///
    /// When the root element was never decorated and inline fallback is on,
    /// every tag carries the namespace declaration itself.
    pub fn meta_tags(&self) -> String {
        let namespace = &self.scope.config.namespace;
        let inline = (!self.namespace_declared && namespace.inline_fallback)
            .then(|| namespace::declare("", &self.prefixes(), namespace.style));
        meta_tags(&self.metadata(), inline.as_deref())
    }
}

/// Serialize a metadata table, one tag per value, skipping empty entries.
pub fn meta_tags(metadata: &Metadata, inline_namespace: Option<&str>) -> String {
    let mut out = String::new();
    for (key, value) in metadata.iter() {
        if key.trim().is_empty() || value.is_empty() {
            continue;
        }
        let key = escape_attr(key);
        for content in value.iter() {
            out.push_str("<meta ");
            if let Some(namespace) = inline_namespace.filter(|ns| !ns.is_empty()) {
                out.push_str(namespace);
                out.push(' ');
            }
            out.push_str(&format!(
                "property=\"{key}\" content=\"{}\" />\n",
                escape_attr(content)
            ));
        }
    }
    out
}

/// Escape text for a double- or single-quoted attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

// ============================================================================
// Tests
// ============================================================================
