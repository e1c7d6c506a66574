//! Batch injection over a directory of pages.
//!
//! ```text
//! public/
//! ├── index.html
//! ├── index.og.toml   ──► index.html gets decorated
//! ├── about.html      ──► skipped (no context)
//! └── post/
//!     ├── hello.html
//!     └── hello.og.json ──► post/hello.html gets decorated
//! ```

use crate::{OpenGraph, context::Snapshot, html, log};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Context file extensions, in lookup order.
const CONTEXT_SUFFIXES: [&str; 2] = ["og.toml", "og.json"];

/// A page paired with its context snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub html: PathBuf,
    pub context: PathBuf,
}

/// Find every `*.html` under `dir` that has a sibling context file.
pub fn collect_pages(dir: &Path) -> Vec<Page> {
    let mut pages: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log!("build"; "skipping {}: {}", e.path().unwrap_or(dir).display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .filter_map(|html| {
            let context = context_for(&html)?;
            Some(Page { html, context })
        })
        .collect();
    pages.sort_by(|a, b| a.html.cmp(&b.html));
    pages
}

/// `dir/page.html` -> `dir/page.og.toml` or `dir/page.og.json`.
fn context_for(html: &Path) -> Option<PathBuf> {
    CONTEXT_SUFFIXES
        .iter()
        .map(|suffix| html.with_extension(suffix))
        .find(|path| path.is_file())
}

/// Decorate one page with the given context and return the new document.
pub fn inject_file(og: &OpenGraph, context: &Path, input: &Path) -> Result<Vec<u8>> {
    let snapshot = Snapshot::from_path(context)?;
    let content = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let mut render = og.render(&snapshot, &snapshot);
    html::inject(&content, &mut render).with_context(|| input.display().to_string())
}

/// Inject every page under `dir` in parallel.
///
/// Pages are rewritten in place, or mirrored under `output` when given.
/// Returns the number of pages written.
pub fn build_pages(og: &OpenGraph, dir: &Path, output: Option<&Path>) -> Result<usize> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }

    let pages = collect_pages(dir);
    log!("build"; "found {} pages with context", pages.len());

    let has_error = AtomicBool::new(false);
    pages.par_iter().try_for_each(|page| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = build_page(og, dir, output, page) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", page.html.display(), e);
            }
            return Err(anyhow!("Build failed"));
        }
        Ok(())
    })?;

    log!("build"; "injected {} pages", pages.len());
    Ok(pages.len())
}

fn build_page(og: &OpenGraph, dir: &Path, output: Option<&Path>, page: &Page) -> Result<()> {
    let html = inject_file(og, &page.context, &page.html)?;

    let relative = page.html.strip_prefix(dir).unwrap_or(&page.html);
    let target = match output {
        Some(output) => output.join(relative),
        None => page.html.clone(),
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, html).with_context(|| format!("failed to write {}", target.display()))?;

    log!("inject"; "{}", relative.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = "<html lang=\"en\"><head><title>x</title></head><body></body></html>";

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("post")).unwrap();

        fs::write(root.join("index.html"), PAGE).unwrap();
        fs::write(
            root.join("index.og.toml"),
            "[site]\nname = \"Example\"\n[query]\nkind = \"home\"\n",
        )
        .unwrap();

        fs::write(root.join("about.html"), PAGE).unwrap();

        fs::write(root.join("post/hello.html"), PAGE).unwrap();
        fs::write(
            root.join("post/hello.og.json"),
            r#"{"query": {"kind": "singular"}, "posts": [{"id": 1, "title": "Hello"}]}"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_collect_pages() {
        let dir = site();
        let pages = collect_pages(dir.path());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].html, dir.path().join("index.html"));
        assert_eq!(pages[0].context, dir.path().join("index.og.toml"));
        assert_eq!(pages[1].context, dir.path().join("post/hello.og.json"));
    }

    #[test]
    fn test_collect_pages_walk_error_is_skipped() {
        // The walk error for a missing root is reported, not returned
        assert!(collect_pages(Path::new("/nonexistent/site")).is_empty());

        let dir = site();
        let missing = dir.path().join("missing");
        assert!(collect_pages(&missing).is_empty());
        assert_eq!(collect_pages(dir.path()).len(), 2);
    }

    #[test]
    fn test_build_pages_in_place() {
        let dir = site();
        let count = build_pages(&OpenGraph::default(), dir.path(), None).unwrap();
        assert_eq!(count, 2);

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains("<meta property=\"og:site_name\" content=\"Example\" />"));
        assert!(index.contains("prefix=\"og: http://ogp.me/ns#\""));

        let hello = fs::read_to_string(dir.path().join("post/hello.html")).unwrap();
        assert!(hello.contains("<meta property=\"og:title\" content=\"Hello\" />"));

        let about = fs::read_to_string(dir.path().join("about.html")).unwrap();
        assert_eq!(about, PAGE);
    }

    #[test]
    fn test_build_pages_to_output() {
        let dir = site();
        let out = TempDir::new().unwrap();
        build_pages(&OpenGraph::default(), dir.path(), Some(out.path())).unwrap();

        assert!(out.path().join("post/hello.html").is_file());
        assert!(!out.path().join("about.html").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("post/hello.html")).unwrap(),
            PAGE
        );
    }

    #[test]
    fn test_build_pages_bad_context() {
        let dir = site();
        fs::write(dir.path().join("index.og.toml"), "[query\n").unwrap();
        assert!(build_pages(&OpenGraph::default(), dir.path(), None).is_err());
    }

    #[test]
    fn test_build_pages_missing_dir() {
        assert!(build_pages(&OpenGraph::default(), Path::new("/nonexistent/dir"), None).is_err());
    }
}
