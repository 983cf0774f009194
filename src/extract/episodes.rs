//! Episode list extraction from the season endpoint.

use super::ExtractionError;
use super::site_types::RawEpisodePage;
use crate::model::Episode;

/// Decodes a `getCapitulos` body into episodes.
///
/// Episode URLs are made absolute by prefixing `base_url` to the raw
/// site-relative URL.
pub fn extract_episodes(body: &str, base_url: &str) -> Result<Vec<Episode>, ExtractionError> {
    let page: RawEpisodePage =
        serde_json::from_str(body).map_err(|source| ExtractionError::Decode {
            what: "episode list",
            source,
        })?;

    Ok(page
        .episodes
        .into_iter()
        .map(|raw| Episode {
            id: raw.id,
            title: raw.post_title.unwrap_or_default(),
            subtitle: raw.post_subtitle,
            description: raw.post_content,
            date: raw.post_date,
            icon: raw.image,
            url: format!("{}{}", base_url, raw.url),
        })
        .collect())
}
