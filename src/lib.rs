//! Open Graph metadata for CMS pages.
//!
//! # Architecture
//!
//! ```text
//! QueryContext + AttachmentStore          (read-only request state)
//!            │
//!            ▼
//! Hooks ── property chains ──► Metadata ──► <meta property=".." content=".." />
//!   │
//!   └──── prefix chain ──► Prefixes ──► <html prefix="og: ...">
//! ```
//!
//! - [`property`]: the core property schema and value types
//! - [`hooks`]: priority-ordered filter chains and the render [`Scope`](hooks::Scope)
//! - [`resolvers`]: built-in defaults, registered at fallback priority
//! - [`metadata`], [`namespace`]: table and prefix aggregation
//! - [`render`]: per-request state and markup output
//! - [`html`]: injection into existing documents
//! - [`build`]: batch injection over a directory
//!
//! # Example
//!
//! ```ignore
//! let mut og = OpenGraph::new(OpenGraphConfig::default());
//! og.hooks_mut().add_filter(Property::Title, DEFAULT_PRIORITY, |title, _| title);
//!
//! let snapshot = Snapshot::from_path(Path::new("post.og.toml"))?;
//! let mut render = og.render(&snapshot, &snapshot);
//! let root = render.language_attributes(r#"lang="en""#);
//! let head = render.meta_tags();
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod hooks;
pub mod html;
pub mod logger;
pub mod metadata;
pub mod namespace;
pub mod property;
pub mod render;
pub mod resolvers;

pub use engine::OpenGraph;
