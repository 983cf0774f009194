/// Resolver that scrapes the mitele handler link from descargavideos.tv.
use super::{ResolveError, StreamResolver};
use crate::fetch::Fetcher;
use crate::model::{Episode, Stream};
use tracing::{debug, warn};

const HANDLER_MARKER: &str = "/mitele_handler.php";

/// Asks the download-helper site for the episode and follows its handler.
pub struct DescargaVideosResolver {
    base_url: String,
}

impl DescargaVideosResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Slices the handler path out of the helper page.
    ///
    /// The path runs from the handler marker to the nearest following quote
    /// of either kind. Without the marker or a closing quote there is no
    /// handler to follow.
    fn handler_path(html: &str) -> Option<&str> {
        let start = html.find(HANDLER_MARKER)?;
        let rest = &html[start..];
        let end = [rest.find('"'), rest.find('\'')]
            .into_iter()
            .flatten()
            .min()?;
        Some(&rest[..end])
    }
}

impl StreamResolver for DescargaVideosResolver {
    fn resolve(
        &self,
        fetcher: &dyn Fetcher,
        episode: &Episode,
    ) -> Result<Option<Stream>, ResolveError> {
        // Two requests: the episode page itself, then the helper lookup.
        let page = fetcher.get(&episode.url, &[])?;
        debug!(url = %episode.url, bytes = page.len(), "fetched episode page");

        let html = fetcher.get(&self.base_url, &[("modo", "1"), ("web", episode.url.as_str())])?;

        let Some(path) = Self::handler_path(&html) else {
            warn!(url = %episode.url, "no mitele handler in descargavideos response");
            return Ok(None);
        };

        Ok(Stream::new(
            episode.title.clone(),
            vec![format!("{}{}", self.base_url, path)],
        ))
    }
}
