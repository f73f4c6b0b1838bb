//! Disk-image packaging settings.
//!
//! Static settings handed to the macOS disk-image packager when the desktop
//! application is released. Nothing in the index build reads them; they are
//! kept here so the `[packaging]` section of `flat-index.toml` is typed,
//! validated, and emitted in the stock config alongside everything else.
//!
//! ```toml
//! [packaging]
//! filename = "Scrite-{version}.dmg"
//! volume_name = "Scrite {version}"
//! format = "UDBZ"
//! filesystem = "HFS+"
//! icon_size = 128
//! files = ["Scrite.app"]
//!
//! [packaging.window]
//! x = 100
//! y = 100
//! width = 640
//! height = 280
//!
//! [packaging.icon_locations]
//! "Scrite.app" = [140, 120]
//! Applications = [500, 120]
//!
//! [packaging.symlinks]
//! Applications = "/Applications"
//! ```

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder substituted with the release version in name templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Image formats accepted by `hdiutil`.
const KNOWN_FORMATS: &[&str] = &["UDRW", "UDRO", "UDCO", "UDZO", "UDBZ", "ULFO", "ULMO"];

const KNOWN_FILESYSTEMS: &[&str] = &["HFS+", "APFS"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingConfig {
    /// Output file name template, e.g. `"Scrite-{version}.dmg"`.
    pub filename: String,
    /// Mounted volume name template, e.g. `"Scrite {version}"`.
    pub volume_name: String,
    /// `hdiutil` image format (`UDBZ` = bzip2-compressed).
    pub format: String,
    /// Filesystem inside the image.
    pub filesystem: String,
    /// Finder window position and size when the image is opened.
    pub window: WindowRect,
    pub show_status_bar: bool,
    pub show_tab_view: bool,
    pub show_toolbar: bool,
    pub show_pathbar: bool,
    pub show_sidebar: bool,
    /// Icon size in points.
    pub icon_size: u32,
    /// Item name → `[x, y]` icon position inside the window.
    pub icon_locations: BTreeMap<String, [i32; 2]>,
    /// Source paths copied into the image.
    pub files: Vec<String>,
    /// Symlink name → target created inside the image.
    pub symlinks: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            filename: "Scrite-{version}.dmg".to_string(),
            volume_name: "Scrite {version}".to_string(),
            format: "UDBZ".to_string(),
            filesystem: "HFS+".to_string(),
            window: WindowRect {
                x: 100,
                y: 100,
                width: 640,
                height: 280,
            },
            show_status_bar: false,
            show_tab_view: false,
            show_toolbar: false,
            show_pathbar: false,
            show_sidebar: false,
            icon_size: 128,
            icon_locations: BTreeMap::from([
                ("Scrite.app".to_string(), [140, 120]),
                ("Applications".to_string(), [500, 120]),
            ]),
            files: vec!["Scrite.app".to_string()],
            symlinks: BTreeMap::from([("Applications".to_string(), "/Applications".to_string())]),
        }
    }
}

impl PackagingConfig {
    /// Image file name for a release, e.g. `Scrite-1.2.0.dmg`.
    pub fn filename_for(&self, version: &str) -> String {
        self.filename.replace(VERSION_PLACEHOLDER, version)
    }

    /// Volume name for a release, e.g. `Scrite 1.2.0`.
    pub fn volume_name_for(&self, version: &str) -> String {
        self.volume_name.replace(VERSION_PLACEHOLDER, version)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.filename.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "packaging.filename must contain {VERSION_PLACEHOLDER}"
            )));
        }
        if !self.filename.ends_with(".dmg") {
            return Err(ConfigError::Validation(
                "packaging.filename must end with .dmg".into(),
            ));
        }
        if !self.volume_name.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "packaging.volume_name must contain {VERSION_PLACEHOLDER}"
            )));
        }
        if !KNOWN_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "packaging.format must be one of {KNOWN_FORMATS:?}, got {:?}",
                self.format
            )));
        }
        if !KNOWN_FILESYSTEMS.contains(&self.filesystem.as_str()) {
            return Err(ConfigError::Validation(format!(
                "packaging.filesystem must be one of {KNOWN_FILESYSTEMS:?}, got {:?}",
                self.filesystem
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Validation(
                "packaging.window width and height must be non-zero".into(),
            ));
        }
        if self.icon_size == 0 {
            return Err(ConfigError::Validation(
                "packaging.icon_size must be non-zero".into(),
            ));
        }
        for name in self.icon_locations.keys() {
            if !self.has_item(name) {
                return Err(ConfigError::Validation(format!(
                    "packaging.icon_locations entry {name:?} is neither an included file nor a symlink"
                )));
            }
        }
        Ok(())
    }

    /// Whether `name` is shown in the image window: an included file's
    /// basename or a symlink name.
    fn has_item(&self, name: &str) -> bool {
        self.symlinks.contains_key(name)
            || self.files.iter().any(|f| {
                Path::new(f)
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy() == name)
            })
    }
}
