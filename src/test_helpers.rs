//! Shared test utilities for the flat-index test suite.
//!
//! Provides builders for host-side page objects, a docs-tree writer for
//! scanner and pipeline tests, small extractors over flat entries, and a log
//! capture for asserting on emitted records.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let guide = page("Guide", "/guide/", vec![
//!     heading(2, "Install", "#install", vec![]),
//! ]);
//!
//! let tmp = write_docs(&[("index.md", "# Home\n"), ("guide.md", "# Guide\n")]);
//! ```

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

use crate::types::{FlatEntry, Page, TocItem};

// =========================================================================
// Host object builders
// =========================================================================

pub fn page(title: &str, abs_url: &str, toc: Vec<TocItem>) -> Page {
    Page {
        title: title.to_string(),
        abs_url: abs_url.to_string(),
        toc,
    }
}

pub fn heading(level: u32, title: &str, url: &str, children: Vec<TocItem>) -> TocItem {
    TocItem {
        level,
        title: title.to_string(),
        url: url.to_string(),
        children,
    }
}

/// Count outline nodes with `level > 1` at any depth.
pub fn count_above_level_one(items: &[TocItem]) -> usize {
    items
        .iter()
        .map(|i| usize::from(i.level > 1) + count_above_level_one(&i.children))
        .sum()
}

// =========================================================================
// Docs tree fixtures
// =========================================================================

/// Write `(relative path, content)` pairs into a fresh temp directory.
///
/// Parent directories are created as needed.
pub fn write_docs(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), files);
    tmp
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
}

// =========================================================================
// Extractors
// =========================================================================

pub fn entry_titles(entries: &[FlatEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

pub fn entry_urls(entries: &[FlatEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.url.as_str()).collect()
}

/// Titles of an outline in pre-order, indented two spaces per nesting depth.
///
/// Handy for asserting tree shape in one comparison:
///
/// ```text
/// ["Guide", "  Install", "    From source", "  Usage"]
/// ```
pub fn outline_shape(items: &[TocItem]) -> Vec<String> {
    let mut out = Vec::new();
    collect_shape(items, 0, &mut out);
    out
}

fn collect_shape(items: &[TocItem], depth: usize, out: &mut Vec<String>) {
    for item in items {
        out.push(format!("{}{}", "  ".repeat(depth), item.title));
        collect_shape(&item.children, depth + 1, out);
    }
}

// =========================================================================
// Log capture
// =========================================================================

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

/// Records are kept per thread, so tests running in parallel only see
/// their own messages.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Run `f` and return its result with every log record it emitted on this
/// thread.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    INSTALL_LOGGER.call_once(|| {
        log::set_logger(&LOGGER).ok();
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let out = f();
    let records = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());
    (out, records)
}

/// Captured records at exactly `level`.
pub fn records_at(records: &[(Level, String)], level: Level) -> Vec<&str> {
    records
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, msg)| msg.as_str())
        .collect()
}
