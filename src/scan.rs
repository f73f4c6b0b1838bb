//! Docs directory scanning.
//!
//! Walks a markdown docs tree and produces one [`SourcePage`] per `.md` file,
//! in the order a documentation generator's default navigation visits them.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/
//! ├── index.md              # /            (visited first)
//! ├── api.md                # /api/
//! ├── guide/
//! │   ├── index.md          # /guide/      (first within guide/)
//! │   ├── advanced-usage.md # /guide/advanced-usage/
//! │   └── setup.md          # /guide/setup/
//! └── .drafts/              # hidden, skipped
//! ```
//!
//! Within each directory `index.md` (or `README.md`) comes first, then every
//! other file and subdirectory by name. A `README.md` is ignored when the same
//! directory has an `index.md`. Hidden entries are skipped.
//!
//! ## URLs
//!
//! With directory URLs (the default) a page lives at `/<dir>/<stem>/` and an
//! index page at `/<dir>/`. Without them pages are `.html` files:
//! `/guide/setup.html`, `/guide/index.html`. Path segments are
//! percent-encoded: `my notes.md` → `/my%20notes/`.
//!
//! ## Titles
//!
//! The first level-1 heading in the file, otherwise a title derived from the
//! filename: `advanced-usage.md` → "Advanced usage". Index pages use their
//! directory name, and the root index is "Home".

use crate::outline;
use crate::types::Page;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Docs directory not found: {0}")]
    MissingDocsDir(PathBuf),
}

/// A page read from disk, ready to be handed to the flattener.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub page: Page,
    /// Path relative to the docs directory
    pub source_path: PathBuf,
    /// Raw markdown
    pub content: String,
}

pub fn scan(docs_dir: &Path, use_directory_urls: bool) -> Result<Vec<SourcePage>, ScanError> {
    if !docs_dir.is_dir() {
        return Err(ScanError::MissingDocsDir(docs_dir.to_path_buf()));
    }

    let walker = WalkDir::new(docs_dir)
        .sort_by(nav_order)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        if is_shadowed_readme(entry.path()) {
            log::debug!("skipping {}: index.md takes precedence", entry.path().display());
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(docs_dir)
            .unwrap_or(entry.path())
            .to_path_buf();
        let content = fs::read_to_string(entry.path())?;
        let page = build_page(&rel, &content, use_directory_urls);
        log::debug!("scanned {} → {}", rel.display(), page.abs_url);

        pages.push(SourcePage {
            page,
            source_path: rel,
            content,
        });
    }

    Ok(pages)
}

/// Build the host page object for a markdown file at `rel` inside the docs dir.
pub fn build_page(rel: &Path, content: &str, use_directory_urls: bool) -> Page {
    let headings = outline::collect_headings(content);
    let title = headings
        .iter()
        .find(|h| h.level == 1 && !h.text.is_empty())
        .map(|h| h.text.clone())
        .unwrap_or_else(|| title_from_path(rel));

    Page {
        title,
        abs_url: abs_url(rel, use_directory_urls),
        toc: outline::nest(&headings),
    }
}

/// Site-absolute URL for a docs-relative markdown path.
pub fn abs_url(rel: &Path, use_directory_urls: bool) -> String {
    let dirs: Vec<String> = rel
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    let stem = file_stem(rel);

    let mut url = String::from("/");
    for dir in &dirs {
        url.push_str(&urlencoding::encode(dir));
        url.push('/');
    }

    match (is_index_stem(&stem), use_directory_urls) {
        (true, true) => {}
        (true, false) => url.push_str("index.html"),
        (false, true) => {
            url.push_str(&urlencoding::encode(&stem));
            url.push('/');
        }
        (false, false) => {
            url.push_str(&urlencoding::encode(&stem));
            url.push_str(".html");
        }
    }
    url
}

/// Title derived from a file path when the page has no `# heading`.
pub fn title_from_path(rel: &Path) -> String {
    let stem = file_stem(rel);
    let name = if is_index_stem(&stem) {
        match rel
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
        {
            Some(dir) => dir,
            None => return "Home".to_string(),
        }
    } else {
        stem
    };

    let spaced = name.replace(['-', '_'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_index_stem(stem: &str) -> bool {
    stem == "index" || stem.eq_ignore_ascii_case("readme")
}

/// A `README.md` next to an `index.md` would claim the same URL; the index wins.
fn is_shadowed_readme(path: &Path) -> bool {
    file_stem(path).eq_ignore_ascii_case("readme") && path.with_file_name("index.md").is_file()
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Index files first, then everything else by name.
fn nav_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let key = |e: &DirEntry| {
        let is_index = e.file_type().is_file()
            && is_markdown(e.path())
            && is_index_stem(&file_stem(e.path()));
        (!is_index, e.file_name().to_os_string())
    };
    key(a).cmp(&key(b))
}
