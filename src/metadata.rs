//! Metadata aggregation.
//!
//! ```text
//! Property::ALL ──► hooks.resolve(property, None) ──► "og:<name>" => value
//!                                                          │
//!                                     hooks.metadata (profile:*, config, ...)
//!                                                          ▼
//!                                                      Metadata
//! ```
//!
//! Empty values are kept here; the renderer drops them.

use crate::{hooks::Scope, property::Metadata, property::Property};

/// Resolve every core property in declaration order, then run the
/// `metadata` hook over the whole table.
pub fn collect(scope: &Scope<'_>) -> Metadata {
    let mut metadata = Metadata::new();
    for property in Property::ALL {
        let value = scope
            .hooks
            .resolve(property, None, scope)
            .unwrap_or_default();
        metadata.insert(property.key(), value);
    }
    scope.hooks.metadata.apply(metadata, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::OpenGraphConfig,
        context::Snapshot,
        hooks::{DEFAULT_PRIORITY, Hooks},
        property::Value,
    };

    fn collect_with(hooks: &Hooks) -> Metadata {
        let snapshot = Snapshot::default();
        let config = OpenGraphConfig::default();
        collect(&Scope {
            query: &snapshot,
            media: &snapshot,
            hooks,
            config: &config,
        })
    }

    #[test]
    fn test_collect_declares_every_core_key_in_order() {
        let metadata = collect_with(&Hooks::new());
        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(
            keys,
            [
                "og:title",
                "og:type",
                "og:image",
                "og:url",
                "og:description",
                "og:locale",
                "og:site_name"
            ]
        );
        assert!(metadata.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_metadata_hook_can_add_and_remove() {
        let mut hooks = Hooks::new();
        hooks.add_filter(Property::Title, DEFAULT_PRIORITY, |_, _| Some("T".into()));
        hooks.metadata.add(DEFAULT_PRIORITY, |mut metadata, _| {
            metadata.remove("og:locale");
            metadata.insert("fb:app_id", "123");
            metadata
        });

        let metadata = collect_with(&hooks);
        assert!(!metadata.contains_key("og:locale"));
        assert_eq!(metadata.get("fb:app_id"), Some(&Value::from("123")));
        assert_eq!(metadata.property(Property::Title), Some(&Value::from("T")));
        assert_eq!(metadata.keys().last(), Some("fb:app_id"));
    }
}
