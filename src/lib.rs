//! # flat-index
//!
//! Flattens a documentation site's per-page tables of contents into a single
//! JSON index: one row per page and one row per heading, in reading order.
//! Search boxes and API explorers load the file once and filter it client-side.
//!
//! # Architecture
//!
//! The flattener is a build hook. A documentation generator visits pages one
//! after another and hands each to [`flatten::FlatIndex::record_page`]; when
//! the build is done, [`flatten::FlatIndex::flush`] writes the file:
//!
//! ```text
//! page events  →  FlatIndex (accumulating)  →  flush  →  site/flat_index.json
//! ```
//!
//! The output is a JSON array of `{title, url, level, parent_chapter}` objects:
//!
//! ```json
//! [
//!   { "title": "API",   "url": "/api/",       "level": 1, "parent_chapter": "API" },
//!   { "title": "Setup", "url": "/api/#setup", "level": 2, "parent_chapter": "API" }
//! ]
//! ```
//!
//! For projects without a generator in the loop, [`pipeline::run`] plays the
//! host: it scans a markdown docs tree, builds each page's outline, and drives
//! the flattener itself.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`flatten`] | The accumulator: record pages, flush the JSON index once |
//! | [`types`] | Host-side `Page` / `TocItem` and the output `FlatEntry` |
//! | [`outline`] | Heading outline from markdown: anchors, slugs, nesting |
//! | [`scan`] | Walks the docs directory into pages with URLs and titles |
//! | [`pipeline`] | Scan → record → flush in one call |
//! | [`config`] | `flat-index.toml` loading, merging, validation |
//! | [`packaging`] | Disk-image packaging settings for desktop releases |
//!
//! # Design Decisions
//!
//! ## Explicit Accumulator
//!
//! The index is a value owned by whoever drives the build, not process-wide
//! state. `flush` consumes it, so recording after the write, or writing twice,
//! does not compile.
//!
//! ## Empty Index Is Not Fatal
//!
//! Flushing with nothing recorded logs an error and writes no file. It almost
//! always means the hook was not wired up, and the rest of the site build is
//! still worth keeping.
//!
//! ## Logging
//!
//! Messages go through the `log` facade; the host picks the logger.

pub mod config;
pub mod flatten;
pub mod outline;
pub mod packaging;
pub mod pipeline;
pub mod scan;
pub mod types;

pub use flatten::{FlatIndex, FlushError, FlushOutcome};
pub use types::{FlatEntry, Page, TocItem};

#[cfg(test)]
pub(crate) mod test_helpers;
