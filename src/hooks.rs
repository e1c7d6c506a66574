//! Extension point registry.
//!
//! Every extension point is a [`FilterChain`]: an ordered list of callbacks
//! that each receive the value produced so far and return a (possibly
//! unchanged) value. Callbacks run in ascending priority; equal priorities
//! run in registration order. Nothing short-circuits.
//!
//! # Hook Points
//!
//! | Hook             | Value            | Seeded from                 |
//! |------------------|------------------|-----------------------------|
//! | per-property     | `Option<Value>`  | `None`                      |
//! | `metadata`       | [`Metadata`]     | aggregated core properties  |
//! | `prefixes`       | [`Prefixes`]     | base namespace table        |
//! | `excerpt_length` | `usize`          | `[excerpt].length`          |
//! | `excerpt_more`   | `String`         | `[excerpt].more`            |
//! | `image_size`     | `String`         | `[image].size`              |
//!
//! # Defaults vs. Filters
//!
//! [`Hooks::add_filter`] always replaces the value with whatever the callback
//! returns. [`Hooks::register_default`] wraps a resolver so it is only asked
//! when the accumulated value is absent or empty: a non-empty value supplied
//! by anyone else always passes through untouched.
//!
//! ```ignore
//! let mut og = OpenGraph::new(config);
//! og.hooks_mut().add_filter(Property::Title, DEFAULT_PRIORITY, |_, _| Some("Custom".into()));
//! ```

use crate::{
    config::OpenGraphConfig,
    context::{AttachmentStore, QueryContext},
    namespace::Prefixes,
    property::{Metadata, Property, Value, is_present},
};
use std::{collections::HashMap, fmt};

/// Priority for ordinary filters.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Priority the built-in default resolvers are registered at.
pub const FALLBACK_PRIORITY: i32 = 5;

type Callback<T> = Box<dyn Fn(T, &Scope<'_>) -> T + Send + Sync>;

// ============================================================================
// Render Scope
// ============================================================================

/// Everything a callback may read while resolving one page.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub query: &'a dyn QueryContext,
    pub media: &'a dyn AttachmentStore,
    pub hooks: &'a Hooks,
    pub config: &'a OpenGraphConfig,
}

impl Scope<'_> {
    /// Word limit for trimmed descriptions.
    pub fn excerpt_length(&self) -> usize {
        self.hooks
            .excerpt_length
            .apply(self.config.excerpt.length, self)
    }

    /// Marker appended to trimmed descriptions.
    pub fn excerpt_more(&self) -> String {
        self.hooks
            .excerpt_more
            .apply(self.config.excerpt.more.clone(), self)
    }

    /// Size token used for image URLs.
    pub fn image_size(&self) -> String {
        self.hooks.image_size.apply(self.config.image.size.clone(), self)
    }
}

// ============================================================================
// Filter Chain
// ============================================================================

struct Entry<T> {
    priority: i32,
    callback: Callback<T>,
}

/// Priority-ordered list of callbacks over a value of type `T`.
pub struct FilterChain<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let priorities: Vec<_> = self.entries.iter().map(|e| e.priority).collect();
        f.debug_struct("FilterChain")
            .field("priorities", &priorities)
            .finish()
    }
}

impl<T> FilterChain<T> {
    /// Attach a callback. Later registrations at the same priority run later.
    pub fn add<F>(&mut self, priority: i32, callback: F)
    where
        F: Fn(T, &Scope<'_>) -> T + Send + Sync + 'static,
    {
        let at = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            at,
            Entry {
                priority,
                callback: Box::new(callback),
            },
        );
    }

    /// Run every callback in order, threading the value through.
    pub fn apply(&self, initial: T, scope: &Scope<'_>) -> T {
        self.entries
            .iter()
            .fold(initial, |value, entry| (entry.callback)(value, scope))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// All extension points of the engine.
///
/// Built once during setup; rendering only needs `&Hooks`.
#[derive(Debug, Default)]
pub struct Hooks {
    properties: HashMap<Property, FilterChain<Option<Value>>>,
    pub metadata: FilterChain<Metadata>,
    pub prefixes: FilterChain<Prefixes>,
    pub excerpt_length: FilterChain<usize>,
    pub excerpt_more: FilterChain<String>,
    pub image_size: FilterChain<String>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a filter that may override or extend a property's value.
    pub fn add_filter<F>(&mut self, property: Property, priority: i32, filter: F)
    where
        F: Fn(Option<Value>, &Scope<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        self.properties
            .entry(property)
            .or_default()
            .add(priority, filter);
    }

    /// Attach a resolver that only fills the property in when nothing
    /// non-empty has been supplied by the time it runs.
    pub fn register_default<F>(&mut self, property: Property, resolver: F, priority: i32)
    where
        F: Fn(&Scope<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        self.add_filter(property, priority, move |current, scope| {
            if is_present(&current) {
                current
            } else {
                resolver(scope).and_then(Value::non_empty)
            }
        });
    }

    /// Run the property's chain starting from `initial`.
    pub fn resolve(
        &self,
        property: Property,
        initial: Option<Value>,
        scope: &Scope<'_>,
    ) -> Option<Value> {
        match self.properties.get(&property) {
            Some(chain) => chain.apply(initial, scope),
            None => initial,
        }
    }

    /// Number of callbacks registered for a property.
    pub fn filter_count(&self, property: Property) -> usize {
        self.properties.get(&property).map_or(0, FilterChain::len)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Snapshot;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn with_scope<R>(hooks: &Hooks, f: impl FnOnce(&Scope<'_>) -> R) -> R {
        let snapshot = Snapshot::default();
        let config = OpenGraphConfig::default();
        let scope = Scope {
            query: &snapshot,
            media: &snapshot,
            hooks,
            config: &config,
        };
        f(&scope)
    }

    fn append(tag: &'static str) -> impl Fn(String, &Scope<'_>) -> String + Send + Sync {
        move |mut s: String, _: &Scope<'_>| {
            s.push_str(tag);
            s
        }
    }

    #[test]
    fn test_chain_runs_in_priority_order() {
        let mut hooks = Hooks::new();
        hooks.excerpt_more.add(20, append("c"));
        hooks.excerpt_more.add(1, append("a"));
        hooks.excerpt_more.add(10, append("b"));

        let out = with_scope(&hooks, |scope| hooks.excerpt_more.apply(String::new(), scope));
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_chain_ties_keep_registration_order() {
        let mut hooks = Hooks::new();
        hooks.excerpt_more.add(10, append("1"));
        hooks.excerpt_more.add(10, append("2"));
        hooks.excerpt_more.add(5, append("0"));
        hooks.excerpt_more.add(10, append("3"));

        let out = with_scope(&hooks, |scope| hooks.excerpt_more.apply(String::new(), scope));
        assert_eq!(out, "0123");
    }

    #[test]
    fn test_resolve_without_filters_returns_initial() {
        let hooks = Hooks::new();
        let out = with_scope(&hooks, |scope| {
            hooks.resolve(Property::Title, Some("x".into()), scope)
        });
        assert_eq!(out, Some(Value::from("x")));
        assert_eq!(hooks.filter_count(Property::Title), 0);
    }

    #[test]
    fn test_default_does_not_overwrite_earlier_value() {
        let mut hooks = Hooks::new();
        hooks.add_filter(Property::Title, 1, |_, _| Some("theme".into()));
        hooks.register_default(Property::Title, |_| Some("default".into()), FALLBACK_PRIORITY);

        let out = with_scope(&hooks, |scope| hooks.resolve(Property::Title, None, scope));
        assert_eq!(out, Some(Value::from("theme")));
    }

    #[test]
    fn test_later_filter_overrides_default() {
        let mut hooks = Hooks::new();
        hooks.register_default(Property::Title, |_| Some("default".into()), FALLBACK_PRIORITY);
        hooks.add_filter(Property::Title, DEFAULT_PRIORITY, |current, _| {
            assert_eq!(current, Some(Value::from("default")));
            Some("theme".into())
        });

        let out = with_scope(&hooks, |scope| hooks.resolve(Property::Title, None, scope));
        assert_eq!(out, Some(Value::from("theme")));
    }

    #[test]
    fn test_default_fills_empty_value() {
        let mut hooks = Hooks::new();
        hooks.add_filter(Property::Title, 1, |_, _| Some(Value::default()));
        hooks.register_default(Property::Title, |_| Some("default".into()), FALLBACK_PRIORITY);

        let out = with_scope(&hooks, |scope| hooks.resolve(Property::Title, None, scope));
        assert_eq!(out, Some(Value::from("default")));
    }

    #[test]
    fn test_default_resolver_not_called_when_present() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut hooks = Hooks::new();
        hooks.register_default(
            Property::Type,
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Some("blog".into())
            },
            FALLBACK_PRIORITY,
        );

        with_scope(&hooks, |scope| {
            hooks.resolve(Property::Type, Some("article".into()), scope);
            hooks.resolve(Property::Type, None, scope);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_default_result_becomes_none() {
        let mut hooks = Hooks::new();
        hooks.register_default(Property::Url, |_| Some(Value::Many(vec![])), FALLBACK_PRIORITY);

        let out = with_scope(&hooks, |scope| hooks.resolve(Property::Url, None, scope));
        assert_eq!(out, None);
    }

    #[test]
    fn test_scope_reads_config_through_hooks() {
        let mut hooks = Hooks::new();
        hooks.excerpt_length.add(DEFAULT_PRIORITY, |n, _| n / 5);
        hooks.image_size.add(DEFAULT_PRIORITY, |_, _| "large".into());

        with_scope(&hooks, |scope| {
            assert_eq!(scope.excerpt_length(), 11);
            assert_eq!(scope.excerpt_more(), "…");
            assert_eq!(scope.image_size(), "large");
        });
    }

    #[test]
    fn test_filter_chain_debug_lists_priorities() {
        let mut chain: FilterChain<usize> = FilterChain::default();
        chain.add(10, |n, _| n);
        chain.add(5, |n, _| n);
        assert_eq!(format!("{chain:?}"), "FilterChain { priorities: [5, 10] }");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}
