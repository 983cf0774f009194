//! Program list extraction from category pages.

use super::{flatten_newlines, slice_list};
use crate::config::CategoryListing;
use crate::model::{Category, Program};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Anchor target, anchor title and, when present, the first image source.
static PROGRAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href *= *"(.*?)" *title *= *"(.*?)"(?:.*?<img.*?src *= *"(.*?)")?"#).unwrap()
});

const ITEM_MARKER: &str = r#"<li class="Element">"#;

/// Literal markers bounding a category's program list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramMarkers {
    /// Marker of the container holding the list
    pub container: String,
    /// Marker that starts every program entry
    pub item: String,
    /// First marker after the list
    pub end: String,
}

impl ProgramMarkers {
    /// Markers for a category under the given listing layout.
    pub fn for_category(listing: CategoryListing, category: &Category) -> Self {
        match listing {
            CategoryListing::Homepage => Self {
                container: format!(r#"<div id="{}""#, category.id),
                item: ITEM_MARKER.to_string(),
                end: "</ul>".to_string(),
            },
            CategoryListing::Section => Self {
                container: r#"<div class="programCatList">"#.to_string(),
                item: ITEM_MARKER.to_string(),
                end: r#"<div class="Pagination">"#.to_string(),
            },
        }
    }
}

/// Extracts the programs listed in a category page.
///
/// Entries that do not match the program pattern are skipped, so the result
/// never has more entries than the list has items.
pub fn extract_programs(html: &str, markers: &ProgramMarkers) -> Vec<Program> {
    let Some(list) = slice_list(html, &markers.container, &markers.item, &markers.end) else {
        warn!(container = %markers.container, "program list not found");
        return Vec::new();
    };

    flatten_newlines(list)
        .split(markers.item.as_str())
        .filter_map(|fragment| {
            let captures = PROGRAM_PATTERN.captures(fragment)?;
            Some(Program {
                url: captures[1].to_string(),
                title: captures[2].to_string(),
                logo: captures.get(3).map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}
