//! End-to-end index build.
//!
//! ```text
//! docs/  →  scan  →  record_page (per page, in nav order)  →  flush  →  site/flat_index.json
//! ```
//!
//! [`run`] owns the [`FlatIndex`] for the duration of one build, so there is
//! exactly one accumulator per build and exactly one flush at the end.

use crate::config::{self, IndexConfig};
use crate::flatten::{FlatIndex, FlushError, FlushOutcome};
use crate::scan::{self, ScanError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Flush error: {0}")]
    Flush(#[from] FlushError),
}

/// Build the flat index for the docs tree described by `config`.
pub fn run(config: &IndexConfig) -> Result<FlushOutcome, PipelineError> {
    let pages = scan::scan(&config.docs_dir, config.use_directory_urls)?;
    log::debug!(
        "recording {} pages from {}",
        pages.len(),
        config.docs_dir.display()
    );

    let mut index = FlatIndex::new();
    for source in &pages {
        index.record_page(&source.page, &source.content);
    }

    Ok(index.flush_to(&config.index_path())?)
}

/// Load `flat-index.toml` from `root` and build the index.
pub fn run_project(root: &Path) -> Result<FlushOutcome, PipelineError> {
    let config = config::load_config(root)?;
    run(&config)
}
