//! Search result extraction.

use super::{flatten_newlines, slice_list};
use crate::model::SearchResult;
use regex::Regex;
use std::sync::LazyLock;

const RESULTS_CONTAINER: &str = r#"<div class="search-results">"#;
const POST_MARKER: &str = r#"<article class="post">"#;
const RESULTS_END: &str = r#"<div class="pagination">"#;

/// Captures icon, url, title, subtitle and description, in that order.
static RESULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"<img[^>]*?src *= *"(.*?)".*?"#,
        r#"<a[^>]*?href *= *"(.*?)"[^>]*>(.*?)</a>.*?"#,
        r#"<h4[^>]*>(.*?)</h4>.*?"#,
        r#"<p[^>]*>(.*?)</p>"#,
    ))
    .unwrap()
});

fn plain_text(html: &str) -> String {
    nanohtml2text::html2text(html).trim().to_string()
}

/// Extracts the hits of one search results page.
///
/// Posts missing any of the five fields are skipped.
pub fn extract_search_results(html: &str) -> Vec<SearchResult> {
    let Some(list) = slice_list(html, RESULTS_CONTAINER, POST_MARKER, RESULTS_END) else {
        return Vec::new();
    };

    flatten_newlines(list)
        .split(POST_MARKER)
        .filter_map(|post| {
            let captures = RESULT_PATTERN.captures(post)?;
            Some(SearchResult {
                icon: captures[1].to_string(),
                url: captures[2].to_string(),
                title: plain_text(&captures[3]),
                subtitle: plain_text(&captures[4]),
                description: plain_text(&captures[5]),
            })
        })
        .collect()
}
