//! Extraction of navigation records from raw site responses
//!
//! The site serves unstructured HTML with inline script data, so extraction
//! works on literal markers and bounded regular expressions rather than a
//! DOM. A marker that cannot be found is not an error: the page simply
//! yields fewer (or no) records. Only data that was located but cannot be
//! decoded is reported as an [`ExtractionError`].

mod episodes;
mod programs;
mod search;
mod seasons;
mod site_types;

pub use episodes::extract_episodes;
pub use programs::{ProgramMarkers, extract_programs};
pub use search::extract_search_results;
pub use seasons::extract_seasons;

use thiserror::Error;

/// Errors that can occur while decoding located page data
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A located JSON document or data island failed to decode
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Replaces line breaks with spaces so patterns can match across them.
fn flatten_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Returns the slice starting at the first `item` marker after `container`
/// and ending before the first `end` marker after that, or at the end of
/// the text when `end` never appears.
fn slice_list<'a>(text: &'a str, container: &str, item: &str, end: &str) -> Option<&'a str> {
    let container_at = text.find(container)?;
    let start = container_at + text[container_at..].find(item)?;
    let stop = text[start..]
        .find(end)
        .map_or(text.len(), |offset| start + offset);
    Some(&text[start..stop])
}
