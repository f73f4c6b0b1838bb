//! Heading outlines extracted from markdown.
//!
//! Builds the per-page [`TocItem`] tree a documentation generator would hand
//! to the flattener. Only headings are looked at; nothing is rendered.
//!
//! ## Anchors
//!
//! Every heading gets an anchor used as its `#fragment`:
//!
//! - An explicit attribute wins: `## Install {#setup}` → `#setup`
//! - Otherwise the text is slugified: `## Getting Started!` → `#getting-started`
//! - Repeated slugs are numbered: `#usage`, `#usage_1`, `#usage_2`
//!
//! ## Nesting
//!
//! A heading owns every following heading of a deeper level, up to the next
//! heading at its own level or shallower. Skipped levels are fine:
//!
//! ```text
//! # A          A
//! ### B        └── B
//! ## C         └── C
//! # D          D
//! ```

use crate::types::TocItem;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;

/// A heading as it appears in the document, before nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u32,
    pub text: String,
    pub anchor: String,
}

/// Parse markdown into a nested heading outline.
pub fn parse_outline(markdown: &str) -> Vec<TocItem> {
    nest(&collect_headings(markdown))
}

/// Collect all headings in document order with unique anchors.
pub fn collect_headings(markdown: &str) -> Vec<Heading> {
    let mut raw: Vec<(u32, String, Option<String>)> = Vec::new();
    let mut current: Option<(u32, String, Option<String>)> = None;

    for event in Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as u32, String::new(), id.map(|s| s.to_string())));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text, id)) = current.take() {
                    raw.push((level, text.trim().to_string(), id));
                }
            }
            _ => {}
        }
    }

    // Explicit ids are claimed up front so generated slugs never collide with them
    let mut used: HashSet<String> = raw.iter().filter_map(|(_, _, id)| id.clone()).collect();

    raw.into_iter()
        .map(|(level, text, id)| {
            let anchor = match id {
                Some(id) => id,
                None => {
                    let anchor = unique_anchor(slugify(&text), &used);
                    used.insert(anchor.clone());
                    anchor
                }
            };
            Heading { level, text, anchor }
        })
        .collect()
}

/// Nest a flat heading list into a tree by level.
pub fn nest(headings: &[Heading]) -> Vec<TocItem> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < headings.len() {
        let head = &headings[i];
        let end = headings[i + 1..]
            .iter()
            .position(|h| h.level <= head.level)
            .map_or(headings.len(), |offset| i + 1 + offset);

        items.push(TocItem {
            level: head.level,
            title: head.text.clone(),
            url: format!("#{}", head.anchor),
            children: nest(&headings[i + 1..end]),
        });
        i = end;
    }
    items
}

/// Turn heading text into an anchor slug.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// dashes, then collapses whitespace/dash runs into a single `-`.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_lowercase();

    let mut slug = String::with_capacity(kept.len());
    let mut in_sep = false;
    for c in kept.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_sep {
                slug.push('-');
                in_sep = true;
            }
        } else {
            slug.push(c);
            in_sep = false;
        }
    }
    slug
}

/// Number `anchor` until it is non-empty and not in `used`.
///
/// `usage` → `usage_1` → `usage_2`; an empty slug becomes `_1`. A counter
/// that cannot be bumped gets a fresh `_1` suffix instead.
fn unique_anchor(mut anchor: String, used: &HashSet<String>) -> String {
    while anchor.is_empty() || used.contains(&anchor) {
        let bumped = split_counter(&anchor)
            .and_then(|(base, n)| Some(format!("{base}_{}", n.checked_add(1)?)));
        anchor = bumped.unwrap_or_else(|| format!("{anchor}_1"));
    }
    anchor
}

fn split_counter(anchor: &str) -> Option<(&str, u32)> {
    let (base, digits) = anchor.rsplit_once('_')?;
    digits.parse().ok().map(|n| (base, n))
}
