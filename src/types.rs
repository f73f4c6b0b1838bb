//! Shared types exchanged between the page source and the flattener.
//!
//! [`Page`] and [`TocItem`] are the shapes a documentation generator hands to
//! the flattener for each page; [`FlatEntry`] is one row of the JSON index it
//! writes. All three are plain serde structs so they can be fed from, or
//! dumped to, JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// A rendered documentation page as seen by the index hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page title (first `# heading`, or a title derived from the filename)
    pub title: String,
    /// Site-absolute URL, e.g. `/guide/setup/`
    pub abs_url: String,
    /// Heading outline of the page. Empty when the page has no headings.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub toc: Vec<TocItem>,
}

/// One heading in a page outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocItem {
    /// Heading depth: 1 for `#`, 2 for `##`, ...
    pub level: u32,
    pub title: String,
    /// In-page fragment including the `#`, e.g. `#installation`
    pub url: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<TocItem>,
}

/// One row of the flat index.
///
/// Field order is the key order of the written JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub title: String,
    pub url: String,
    /// 1 for the page itself, 2+ for headings
    pub level: u32,
    /// Title of the page owning this entry
    pub parent_chapter: String,
}

/// Hosts send a missing outline either as an absent key or as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
