//! Plain-text helpers for descriptions.
//!
//! Content and biographies arrive as markup with shortcodes. Descriptions
//! must be plain text of bounded length:
//!
//! ```text
//! "[gallery ids=1,2]<p>Hello <b>big</b> world</p>"
//!     │ strip_shortcodes
//!     ▼
//! "<p>Hello <b>big</b> world</p>"
//!     │ trim_words(n = 2, more = "…")   (strips tags first)
//!     ▼
//! "Hello big…"
//! ```

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static RE_SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_SHORTCODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z][A-Za-z0-9_-]*)(?:\s[^\[\]]*)?/?\]").unwrap());
static RE_SHORTCODE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/[A-Za-z][A-Za-z0-9_-]*\]").unwrap());

/// Remove `<script>`/`<style>` blocks with their content, then every tag.
pub fn strip_all_tags(text: &str) -> String {
    let text = RE_SCRIPT_STYLE.replace_all(text, "");
    RE_TAG.replace_all(&text, "").trim().to_owned()
}

/// Remove shortcodes.
///
/// | Input                         | Output          |
/// |-------------------------------|-----------------|
/// | `a [b]x[/b] c`                | `a  c`          |
/// | `a [img src="x" /] c`         | `a  c`          |
/// | `a [lone arg=1] c`            | `a  c`          |
/// | `a [[literal]] c`             | `a [literal] c` |
/// | `a [[b]x[/b]] c`              | `a [b]x[/b] c`  |
/// | `see [1]`                     | `see [1]`       |
pub fn strip_shortcodes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(caps) = RE_SHORTCODE_OPEN.captures(rest) {
        let Some(whole) = caps.get(0) else { break };
        let before = &rest[..whole.start()];
        let after = &rest[whole.end()..];

        // Bytes of `after` that belong to this shortcode: up to the end of
        // the matching `[/name]`, or nothing when self-closing or unmatched.
        let span = if whole.as_str().ends_with("/]") {
            0
        } else {
            let close = format!("[/{}]", &caps[1]);
            after.find(&close).map_or(0, |pos| pos + close.len())
        };

        // `[[name]]` and `[[name]...[/name]]` are escaped literals
        if before.ends_with('[') && after[span..].starts_with(']') {
            out.push_str(&strip_stray_closers(&before[..before.len() - 1]));
            out.push_str(whole.as_str());
            out.push_str(&after[..span]);
            rest = &after[span + 1..];
            continue;
        }

        out.push_str(&strip_stray_closers(before));
        rest = &after[span..];
    }
    out.push_str(&strip_stray_closers(rest));
    out
}

/// Remove `[/name]` closers left without an opener.
fn strip_stray_closers(text: &str) -> Cow<'_, str> {
    RE_SHORTCODE_CLOSE.replace_all(text, "")
}

/// Strip tags and keep the first `limit` words, appending `more` when
/// anything was cut. Words are never split.
pub fn trim_words(text: &str, limit: usize, more: &str) -> String {
    let text = strip_all_tags(text);
    let mut words = text
        .split(|c: char| matches!(c, ' ' | '\n' | '\r' | '\t'))
        .filter(|w| !w.is_empty());

    let kept: Vec<&str> = words.by_ref().take(limit).collect();
    let mut trimmed = kept.join(" ");
    if words.next().is_some() {
        trimmed.push_str(more);
    }
    trimmed
}

// ============================================================================
// Tests
// ============================================================================
