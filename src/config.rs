//! Build configuration module.
//!
//! Handles loading, validating, and merging `flat-index.toml`. Stock defaults
//! are overridden by whatever the project file sets; everything is optional.
//! Nested tables merge key by key, except `[packaging.icon_locations]` and
//! `[packaging.symlinks]`, which a project file replaces as a whole.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! docs_dir = "docs"               # Markdown sources
//! site_dir = "site"               # Build output root; the index is written here
//! index_file = "flat_index.json"  # Index file name inside site_dir
//! use_directory_urls = true       # /guide/setup/ instead of /guide/setup.html
//!
//! [packaging]
//! filename = "Scrite-{version}.dmg"
//! # ... see the packaging module
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! site_dir = "public"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::flatten::INDEX_FILE_NAME;
use crate::packaging::PackagingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "flat-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config value: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `flat-index.toml`.
///
/// All fields have defaults. Relative directories are resolved against the
/// project root by [`IndexConfig::resolve_paths`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Markdown source directory.
    pub docs_dir: PathBuf,
    /// Build output root.
    pub site_dir: PathBuf,
    /// File name of the flat index inside `site_dir`.
    pub index_file: String,
    /// Directory-style page URLs (`/guide/setup/`) rather than `.html` files.
    pub use_directory_urls: bool,
    /// Disk-image packaging settings.
    pub packaging: PackagingConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            site_dir: PathBuf::from("site"),
            index_file: INDEX_FILE_NAME.to_string(),
            use_directory_urls: true,
            packaging: PackagingConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = Path::new(&self.index_file);
        if self.index_file.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(ConfigError::Validation(
                "index_file must be a plain file name".into(),
            ));
        }
        if !self.index_file.ends_with(".json") {
            return Err(ConfigError::Validation(
                "index_file must end with .json".into(),
            ));
        }
        if self.docs_dir == self.site_dir {
            return Err(ConfigError::Validation(
                "docs_dir and site_dir must differ".into(),
            ));
        }
        self.packaging.validate()
    }

    /// Full path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.site_dir.join(&self.index_file)
    }

    /// Make relative `docs_dir` and `site_dir` relative to `root`.
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        if self.docs_dir.is_relative() {
            self.docs_dir = root.join(&self.docs_dir);
        }
        if self.site_dir.is_relative() {
            self.site_dir = root.join(&self.site_dir);
        }
        self
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a TOML table, the bottom layer under `flat-index.toml`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(IndexConfig::default()).expect("default config must serialize")
}

/// Tables that a project file replaces outright instead of merging into.
///
/// These map item names to values; keeping the stock `Scrite.app` entries
/// next to a project's own items would leave icon positions for files that
/// are not in the image.
const REPLACED_TABLES: &[&str] = &["packaging.icon_locations", "packaging.symlinks"];

/// Lay `project` over `defaults`.
///
/// Nested tables merge key by key, except the name → value tables in
/// [`REPLACED_TABLES`]. Scalars and arrays from the project file win.
pub fn merge_layer(defaults: toml::Value, project: toml::Value) -> toml::Value {
    merge_at("", defaults, project)
}

fn merge_at(path: &str, defaults: toml::Value, project: toml::Value) -> toml::Value {
    match (defaults, project) {
        (toml::Value::Table(mut table), toml::Value::Table(overrides))
            if !REPLACED_TABLES.contains(&path) =>
        {
            for (key, value) in overrides {
                let key_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let merged = match table.remove(&key) {
                    Some(default) => merge_at(&key_path, default, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, project) => project,
    }
}

/// Parse `flat-index.toml` in `root`, or `None` when the project has none.
pub fn read_project_file(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path, source })
}

/// Stock defaults plus the optional project layer, typed and validated.
pub fn resolve_config(project: Option<toml::Value>) -> Result<IndexConfig, ConfigError> {
    let defaults = stock_defaults_value();
    let merged = match project {
        Some(project) => merge_layer(defaults, project),
        None => defaults,
    };
    let config: IndexConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config in `root` with `docs_dir` and `site_dir`
/// resolved against it.
pub fn load_config(root: &Path) -> Result<IndexConfig, ConfigError> {
    let config = resolve_config(read_project_file(root)?)?;
    log::debug!(
        "loaded config: docs_dir={}, site_dir={}",
        config.docs_dir.display(),
        config.site_dir.display()
    );
    Ok(config.resolve_paths(root))
}

/// Returns a fully-commented stock `flat-index.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# flat-index Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Markdown sources, relative to this file.
docs_dir = "docs"

# Build output root, relative to this file. The index is written here.
site_dir = "site"

# File name of the flat index inside site_dir.
index_file = "flat_index.json"

# true:  guide/setup.md -> /guide/setup/
# false: guide/setup.md -> /guide/setup.html
use_directory_urls = true

# ---------------------------------------------------------------------------
# Disk-image packaging (desktop release)
# ---------------------------------------------------------------------------
[packaging]
# {version} is replaced with the release version.
filename = "Scrite-{version}.dmg"
volume_name = "Scrite {version}"

# hdiutil image format and filesystem.
format = "UDBZ"
filesystem = "HFS+"

# Finder window chrome.
show_status_bar = false
show_tab_view = false
show_toolbar = false
show_pathbar = false
show_sidebar = false

icon_size = 128

# Source paths copied into the image.
files = ["Scrite.app"]

# Finder window position and size.
[packaging.window]
x = 100
y = 100
width = 640
height = 280

# Item name -> [x, y] inside the window.
[packaging.icon_locations]
"Scrite.app" = [140, 120]
Applications = [500, 120]

# Symlink name -> target.
[packaging.symlinks]
Applications = "/Applications"
"##
}
