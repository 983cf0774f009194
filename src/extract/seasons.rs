//! Season list extraction from program pages.
//!
//! Program pages initialise their season browser with an inline call such as
//! `$('#temporadas').temporadasBrowser([{"ID":..}, ...], ...)`. The array
//! literal passed to that call is the data island we decode.

use super::site_types::RawSeason;
use super::{ExtractionError, flatten_newlines};
use crate::model::Season;
use tracing::warn;

const SEASON_BROWSER_CALL: &str = ".temporadasBrowser(";

/// Locates the season array literal.
///
/// The island runs from the first `[` after the browser call up to and
/// including the first `]` at or after that bracket.
fn season_island(html: &str) -> Option<&str> {
    let call = html.find(SEASON_BROWSER_CALL)?;
    let open = call + html[call..].find('[')?;
    let close = open + html[open..].find(']')?;
    Some(&html[open..=close])
}

/// Extracts the seasons of a program, each positioned on its first page.
pub fn extract_seasons(html: &str) -> Result<Vec<Season>, ExtractionError> {
    let Some(island) = season_island(html) else {
        warn!("season browser data not found");
        return Ok(Vec::new());
    };

    let raw: Vec<RawSeason> =
        serde_json::from_str(&flatten_newlines(island)).map_err(|source| {
            ExtractionError::Decode {
                what: "season list",
                source,
            }
        })?;

    Ok(raw
        .into_iter()
        .map(|season| Season::new(season.id, season.post_title.unwrap_or_default(), season.orden))
        .collect())
}
