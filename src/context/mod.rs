//! Read-only CMS collaborators.
//!
//! Rendering never owns or mutates site data. It only asks two black-box
//! providers about the current request:
//!
//! | Trait               | Answers                                             |
//! |---------------------|-----------------------------------------------------|
//! | [`QueryContext`]    | site info, what kind of page this is, queried object |
//! | [`AttachmentStore`] | thumbnails, attached images, image URLs by size      |
//!
//! [`Snapshot`] implements both from a TOML/JSON description of one request,
//! which is what the CLI and the tests feed in.

mod error;
mod snapshot;

pub use error::ContextError;
pub use snapshot::{Attachment, Snapshot, SnapshotQuery};

use serde::{Deserialize, Serialize};

// ============================================================================
// Site Objects
// ============================================================================

/// Site-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title.
    pub name: String,
    /// Tagline.
    pub description: String,
    /// Locale identifier, e.g. `en_US`.
    pub locale: String,
    /// Home URL.
    pub url: String,
}

/// A post, page or custom post type entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Post {
    pub id: u64,
    /// `post`, `page`, or any custom type.
    #[serde(default = "default_post_type")]
    pub post_type: String,
    pub title: String,
    /// Raw content, may contain markup and shortcodes.
    pub content: String,
    /// Author-supplied excerpt; empty when none was written.
    pub excerpt: String,
    pub permalink: String,
    /// Featured image attachment id.
    pub thumbnail: Option<u64>,
}

fn default_post_type() -> String {
    "post".into()
}

/// A user with an author archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Author {
    pub id: u64,
    pub login: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Biographical info.
    pub description: String,
    /// Author archive URL.
    pub posts_url: String,
}

/// Taxonomy the term belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    #[default]
    Category,
    #[serde(alias = "post_tag")]
    Tag,
}

/// A category or tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Term {
    pub id: u64,
    pub taxonomy: Taxonomy,
    pub name: String,
    pub description: String,
    pub link: String,
}

/// An image attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedImage {
    pub id: u64,
    pub menu_order: i64,
}

// ============================================================================
// Query State
// ============================================================================

/// What the current request is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Exactly one post or page.
    Singular,
    /// An author archive.
    Author,
    /// A category archive.
    Category,
    /// A tag archive.
    Tag,
    /// Home page, date archives, search and everything else.
    #[default]
    #[serde(alias = "home")]
    Other,
}

/// Read-only query state of the current request.
pub trait QueryContext {
    fn site(&self) -> &SiteInfo;

    fn kind(&self) -> QueryKind;

    /// The queried post when [`QueryKind::Singular`].
    fn post(&self) -> Option<&Post>;

    /// The queried author when [`QueryKind::Author`].
    fn author(&self) -> Option<&Author>;

    /// The queried term on category and tag archives.
    fn term(&self) -> Option<&Term>;

    fn is_singular(&self) -> bool {
        self.kind() == QueryKind::Singular
    }

    fn is_author(&self) -> bool {
        self.kind() == QueryKind::Author
    }

    fn is_category(&self) -> bool {
        self.kind() == QueryKind::Category
    }

    fn is_tag(&self) -> bool {
        self.kind() == QueryKind::Tag
    }
}

/// Read-only access to media attachments.
pub trait AttachmentStore {
    /// Featured image of a post.
    fn thumbnail_id(&self, post_id: u64) -> Option<u64>;

    /// Image attachments of a post, in storage order.
    fn attached_images(&self, post_id: u64) -> Vec<AttachedImage>;

    /// URL of an attachment rendered at `size` (e.g. `medium`).
    fn image_url(&self, attachment_id: u64, size: &str) -> Option<String>;
}
