//! Serializable snapshot of one request's CMS state.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "My Blog"
//! description = "Just another blog"
//! locale = "en_US"
//! url = "https://example.com"
//!
//! [query]
//! kind = "singular"
//! id = 42
//!
//! [[posts]]
//! id = 42
//! title = "Hello"
//! permalink = "https://example.com/hello/"
//! content = "Hello <b>world</b>"
//! thumbnail = 7
//!
//! [[attachments]]
//! id = 7
//! parent = 42
//! url = "https://example.com/uploads/cover.jpg"
//! sizes = { medium = "https://example.com/uploads/cover-300x200.jpg" }
//! ```
//!
//! When `query.id` is omitted the first object of the matching kind is used.

use super::{
    AttachedImage, AttachmentStore, Author, ContextError, Post, QueryContext, QueryKind, SiteInfo,
    Taxonomy, Term,
};
use crate::log;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// Which object the request is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotQuery {
    pub kind: QueryKind,
    pub id: Option<u64>,
}

/// A media library entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attachment {
    pub id: u64,
    /// Post the attachment was uploaded to.
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub menu_order: i64,
    /// Full-size URL.
    pub url: String,
    /// Resized variants keyed by size token.
    #[serde(default)]
    pub sizes: BTreeMap<String, String>,
}

fn default_mime_type() -> String {
    "image/jpeg".into()
}

impl Attachment {
    fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// In-memory CMS state for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    pub site: SiteInfo,
    pub query: SnapshotQuery,
    pub posts: Vec<Post>,
    pub authors: Vec<Author>,
    pub terms: Vec<Term>,
    pub attachments: Vec<Attachment>,
}

impl Snapshot {
    /// Parse a snapshot from TOML.
    pub fn from_toml(content: &str) -> Result<Self, ContextError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(content: &str) -> Result<Self, ContextError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a snapshot, picking the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ContextError> {
        let content =
            fs::read_to_string(path).map_err(|err| ContextError::Io(path.to_path_buf(), err))?;
        let snapshot = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => return Err(ContextError::Format(path.to_path_buf())),
        };
        snapshot.warn_missing(path);
        Ok(snapshot)
    }

    /// Report a query that names an object the snapshot does not contain.
    ///
    /// Rendering still succeeds; the affected properties just stay unset.
    fn warn_missing(&self, path: &Path) {
        let found = match self.query.kind {
            QueryKind::Singular => self.post().is_some(),
            QueryKind::Author => self.author().is_some(),
            QueryKind::Category | QueryKind::Tag => self.term().is_some(),
            QueryKind::Other => true,
        };
        if !found {
            log!(
                "context";
                "{}: queried {:?} object {} not found",
                path.display(),
                self.query.kind,
                self.query.id.map_or_else(|| "<first>".to_owned(), |id| id.to_string())
            );
        }
    }

    fn attachment(&self, id: u64) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }
}

/// Find by queried id, or take the first candidate when no id was given.
fn pick<'a, T>(
    mut items: impl Iterator<Item = &'a T>,
    id: Option<u64>,
    id_of: impl Fn(&T) -> u64,
) -> Option<&'a T>
where
    T: 'a,
{
    match id {
        Some(id) => items.find(|item| id_of(item) == id),
        None => items.next(),
    }
}

impl QueryContext for Snapshot {
    fn site(&self) -> &SiteInfo {
        &self.site
    }

    fn kind(&self) -> QueryKind {
        self.query.kind
    }

    fn post(&self) -> Option<&Post> {
        if !self.is_singular() {
            return None;
        }
        pick(self.posts.iter(), self.query.id, |p: &Post| p.id)
    }

    fn author(&self) -> Option<&Author> {
        if !self.is_author() {
            return None;
        }
        pick(self.authors.iter(), self.query.id, |a: &Author| a.id)
    }

    fn term(&self) -> Option<&Term> {
        let taxonomy = match self.query.kind {
            QueryKind::Category => Taxonomy::Category,
            QueryKind::Tag => Taxonomy::Tag,
            _ => return None,
        };
        pick(
            self.terms.iter().filter(|t| t.taxonomy == taxonomy),
            self.query.id,
            |t: &Term| t.id,
        )
    }
}

impl AttachmentStore for Snapshot {
    fn thumbnail_id(&self, post_id: u64) -> Option<u64> {
        self.posts
            .iter()
            .find(|p| p.id == post_id)
            .and_then(|p| p.thumbnail)
    }

    fn attached_images(&self, post_id: u64) -> Vec<AttachedImage> {
        self.attachments
            .iter()
            .filter(|a| a.parent == Some(post_id) && a.is_image())
            .map(|a| AttachedImage {
                id: a.id,
                menu_order: a.menu_order,
            })
            .collect()
    }

    fn image_url(&self, attachment_id: u64, size: &str) -> Option<String> {
        let attachment = self.attachment(attachment_id)?;
        let url = attachment.sizes.get(size).unwrap_or(&attachment.url);
        (!url.is_empty()).then(|| url.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
