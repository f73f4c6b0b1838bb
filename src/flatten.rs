//! TOC flattening: the core of the crate.
//!
//! A [`FlatIndex`] is created empty at the start of a build, receives every
//! page through [`FlatIndex::record_page`] in the order the generator visits
//! them, and is written out once by [`FlatIndex::flush`].
//!
//! ## Entry Order
//!
//! For each page the index holds the page entry first, then its headings in
//! depth-first pre-order:
//!
//! ```text
//! Guide                 level 1   /guide/
//! ├── Install           level 2   /guide/#install
//! │   └── From source   level 3   /guide/#from-source
//! └── Usage             level 2   /guide/#usage
//! ```
//!
//! flattens to `Guide, Install, From source, Usage`, all with
//! `parent_chapter = "Guide"`.
//!
//! ## Level-1 Headings
//!
//! Outline nodes with `level == 1` are never emitted. They are assumed to
//! repeat the page title, which already has its own entry. Their children are
//! still visited.
//!
//! ## Lifecycle
//!
//! `flush` takes the index by value: once written, it cannot be recorded into
//! or flushed again.

use crate::types::{FlatEntry, Page, TocItem};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default output file name, written under the site directory.
pub const INDEX_FILE_NAME: &str = "flat_index.json";

#[derive(Error, Debug)]
pub enum FlushError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What [`FlatIndex::flush`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The index was written to `path` with `entries` rows.
    Written { path: PathBuf, entries: usize },
    /// Nothing was recorded; no file was written.
    Empty,
}

/// Append-only accumulator of flat entries for one build.
#[derive(Debug, Default)]
pub struct FlatIndex {
    entries: Vec<FlatEntry>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page and its outline, returning `content` untouched.
    pub fn record_page<'a>(&mut self, page: &Page, content: &'a str) -> &'a str {
        self.entries.push(FlatEntry {
            title: page.title.clone(),
            url: page.abs_url.clone(),
            level: 1,
            parent_chapter: page.title.clone(),
        });

        for item in &page.toc {
            self.flatten_item(item, &page.abs_url, &page.title);
        }

        content
    }

    fn flatten_item(&mut self, item: &TocItem, page_url: &str, parent_title: &str) {
        if item.level > 1 {
            self.entries.push(FlatEntry {
                title: item.title.clone(),
                url: format!("{page_url}{}", item.url),
                level: item.level,
                parent_chapter: parent_title.to_string(),
            });
        }

        for child in &item.children {
            self.flatten_item(child, page_url, parent_title);
        }
    }

    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the index as `flat_index.json` under `site_dir`.
    pub fn flush(self, site_dir: &Path) -> Result<FlushOutcome, FlushError> {
        self.flush_to(&site_dir.join(INDEX_FILE_NAME))
    }

    /// Write the index to an explicit file path.
    ///
    /// An empty index is logged as an error and nothing is written. Otherwise
    /// parent directories are created and any existing file is overwritten.
    pub fn flush_to(self, output_path: &Path) -> Result<FlushOutcome, FlushError> {
        if self.entries.is_empty() {
            log::error!(
                "flat index is empty, not writing {}: no pages were recorded",
                output_path.display()
            );
            return Ok(FlushOutcome::Empty);
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(output_path, json)?;

        let entries = self.entries.len();
        log::info!(
            "flat index written to {} with {} entries",
            output_path.display(),
            entries
        );

        Ok(FlushOutcome::Written {
            path: output_path.to_path_buf(),
            entries,
        })
    }
}
