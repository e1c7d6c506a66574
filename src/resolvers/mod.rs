//! Built-in default resolvers.
//!
//! Each resolver derives a property from the CMS context and is registered
//! with [`Hooks::register_default`] at [`FALLBACK_PRIORITY`], so it is only
//! consulted while the property is still empty.
//!
//! | Property      | Singular                      | Author        | Category/Tag | Other   |
//! |---------------|-------------------------------|---------------|--------------|---------|
//! | `title`       | post title                    | display name  | -            | -       |
//! | `type`        | `article` for post-like types | `profile`     | `blog`       | `blog`  |
//! | `image`       | thumbnail + attached images   | -             | -            | -       |
//! | `url`         | permalink                     | archive URL   | -            | -       |
//! | `description` | excerpt or content, trimmed   | bio, trimmed  | term desc.   | tagline |
//! | `locale`      | site locale                   | site locale   | site locale  | site locale |
//! | `site_name`   | site title                    | site title    | site title   | site title  |

pub mod text;

use crate::{
    context::QueryKind,
    hooks::{FALLBACK_PRIORITY, Hooks, Scope},
    namespace::{PROFILE_NS, Prefixes},
    property::{Metadata, Property, Value},
};

/// Post types described as `article`.
const ARTICLE_TYPES: [&str; 4] = ["post", "page", "aside", "status"];

/// Register every built-in default plus the author profile extensions.
pub fn register(hooks: &mut Hooks) {
    hooks.register_default(Property::Title, title, FALLBACK_PRIORITY);
    hooks.register_default(Property::Type, og_type, FALLBACK_PRIORITY);
    hooks.register_default(Property::Image, image, FALLBACK_PRIORITY);
    hooks.register_default(Property::Url, url, FALLBACK_PRIORITY);
    hooks.register_default(Property::Description, description, FALLBACK_PRIORITY);
    hooks.register_default(Property::Locale, locale, FALLBACK_PRIORITY);
    hooks.register_default(Property::SiteName, site_name, FALLBACK_PRIORITY);

    hooks.metadata.add(FALLBACK_PRIORITY, profile_metadata);
    hooks.prefixes.add(FALLBACK_PRIORITY, profile_prefix);
}

// ============================================================================
// Property Defaults
// ============================================================================

pub fn title(scope: &Scope<'_>) -> Option<Value> {
    let query = scope.query;
    match query.kind() {
        QueryKind::Singular => query.post().map(|p| p.title.as_str().into()),
        QueryKind::Author => query.author().map(|a| a.display_name.as_str().into()),
        _ => None,
    }
}

pub fn og_type(scope: &Scope<'_>) -> Option<Value> {
    let query = scope.query;
    let kind = match query.kind() {
        QueryKind::Singular
            if query
                .post()
                .is_some_and(|p| ARTICLE_TYPES.contains(&p.post_type.as_str())) =>
        {
            "article"
        }
        QueryKind::Author => "profile",
        _ => "blog",
    };
    Some(kind.into())
}

/// Thumbnail first, then attached images by ascending menu order, each
/// attachment at most once.
pub fn image(scope: &Scope<'_>) -> Option<Value> {
    if !scope.query.is_singular() {
        return None;
    }
    let post = scope.query.post()?;
    let media = scope.media;

    let mut ids: Vec<u64> = media.thumbnail_id(post.id).into_iter().collect();

    let mut attached = media.attached_images(post.id);
    attached.sort_by_key(|a| a.menu_order);
    for attachment in attached {
        if !ids.contains(&attachment.id) {
            ids.push(attachment.id);
        }
    }

    let size = scope.image_size();
    let urls: Vec<String> = ids
        .into_iter()
        .filter_map(|id| media.image_url(id, &size))
        .collect();
    Some(Value::Many(urls))
}

pub fn url(scope: &Scope<'_>) -> Option<Value> {
    let query = scope.query;
    match query.kind() {
        QueryKind::Singular => query.post().map(|p| p.permalink.as_str().into()),
        QueryKind::Author => query.author().map(|a| a.posts_url.as_str().into()),
        _ => None,
    }
}

pub fn description(scope: &Scope<'_>) -> Option<Value> {
    let query = scope.query;
    let raw = match query.kind() {
        QueryKind::Singular => {
            let post = query.post()?;
            if post.excerpt.trim().is_empty() {
                &post.content
            } else {
                &post.excerpt
            }
        }
        QueryKind::Author => &query.author()?.description,
        QueryKind::Category | QueryKind::Tag => &query.term()?.description,
        QueryKind::Other => return Some(query.site().description.as_str().into()),
    };
    Some(trim_description(raw, scope).into())
}

pub fn locale(scope: &Scope<'_>) -> Option<Value> {
    Some(scope.query.site().locale.as_str().into())
}

pub fn site_name(scope: &Scope<'_>) -> Option<Value> {
    Some(scope.query.site().name.as_str().into())
}

/// Shortcodes and tags stripped, cut to the configured word count.
fn trim_description(raw: &str, scope: &Scope<'_>) -> String {
    text::trim_words(
        &text::strip_shortcodes(raw),
        scope.excerpt_length(),
        &scope.excerpt_more(),
    )
}

// ============================================================================
// Author Profile
// ============================================================================

/// Adds `profile:*` entries on author archives.
pub fn profile_metadata(mut metadata: Metadata, scope: &Scope<'_>) -> Metadata {
    if let Some(author) = scope.query.author().filter(|_| scope.query.is_author()) {
        metadata.insert_if_empty("profile:first_name", author.first_name.as_str());
        metadata.insert_if_empty("profile:last_name", author.last_name.as_str());
        metadata.insert_if_empty("profile:username", author.login.as_str());
    }
    metadata
}

/// Declares the `profile` prefix on author archives.
pub fn profile_prefix(mut prefixes: Prefixes, scope: &Scope<'_>) -> Prefixes {
    if scope.query.is_author() {
        prefixes.declare("profile", PROFILE_NS);
    }
    prefixes
}

// ============================================================================
// Tests
// ============================================================================
