//! The configured renderer.
//!
//! [`OpenGraph`] owns the configuration and the hook registry. It is built
//! once, extended through [`OpenGraph::hooks_mut`], and then shared
//! read-only; every page render gets its own [`Render`].

use crate::{
    config::OpenGraphConfig,
    context::{AttachmentStore, QueryContext},
    hooks::{DEFAULT_PRIORITY, Hooks, Scope},
    property::{Metadata, Property, Value},
    render::Render,
    resolvers,
};

/// Configured renderer with the built-in defaults registered.
#[derive(Debug)]
pub struct OpenGraph {
    config: OpenGraphConfig,
    hooks: Hooks,
}

impl OpenGraph {
    pub fn new(config: OpenGraphConfig) -> Self {
        let mut hooks = Hooks::new();
        resolvers::register(&mut hooks);

        if !config.metadata.is_empty() {
            let extra = config.metadata.clone();
            hooks.metadata.add(DEFAULT_PRIORITY, move |metadata, _| {
                merge(metadata, &extra)
            });
        }

        Self { config, hooks }
    }

    pub const fn config(&self) -> &OpenGraphConfig {
        &self.config
    }

    pub const fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Registry for extensions. Only available before rendering starts.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Fixed `key=value` overrides, e.g. from `--set`.
    ///
    /// Core property names (`title` or `og:title`) become property filters;
    /// anything else is added to the metadata table.
    pub fn apply_overrides(&mut self, overrides: &[(String, String)]) {
        let mut extra = Metadata::new();
        for (key, value) in overrides {
            match key.parse::<Property>() {
                Ok(property) => {
                    let value = Value::from(value.as_str());
                    self.hooks
                        .add_filter(property, DEFAULT_PRIORITY, move |_, _| Some(value.clone()));
                }
                Err(_) => extra.insert(key.as_str(), value.as_str()),
            }
        }

        if !extra.is_empty() {
            self.hooks
                .metadata
                .add(DEFAULT_PRIORITY, move |metadata, _| merge(metadata, &extra));
        }
    }

    /// Start a render for one request.
    pub fn render<'a>(
        &'a self,
        query: &'a dyn QueryContext,
        media: &'a dyn AttachmentStore,
    ) -> Render<'a> {
        Render::new(Scope {
            query,
            media,
            hooks: &self.hooks,
            config: &self.config,
        })
    }
}

impl Default for OpenGraph {
    fn default() -> Self {
        Self::new(OpenGraphConfig::default())
    }
}

fn merge(mut metadata: Metadata, extra: &Metadata) -> Metadata {
    for (key, value) in extra.iter() {
        metadata.insert(key, value.clone());
    }
    metadata
}

// ============================================================================
// Tests
// ============================================================================
