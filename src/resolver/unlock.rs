/// Resolver backed by a JSON unlocking API.
use super::{ResolveError, StreamResolver};
use crate::fetch::Fetcher;
use crate::model::{Episode, Stream};
use serde::Deserialize;
use tracing::{debug, warn};

/// Response of the unlocking API.
#[derive(Debug, Deserialize)]
struct UnlockResponse {
    success: bool,
    #[serde(default)]
    videos: Vec<UnlockedVideo>,
}

#[derive(Debug, Deserialize)]
struct UnlockedVideo {
    #[serde(default)]
    title: Option<String>,
    #[serde(alias = "urls")]
    url: OneOrMany,
}

/// The API reports a single candidate as a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(url) => vec![url],
            OneOrMany::Many(urls) => urls,
        }
    }
}

/// Submits the canonical episode page URL as the API's `url` parameter.
pub struct UnlockApiResolver {
    endpoint: String,
}

impl UnlockApiResolver {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Picks the stream out of an API response body.
    fn parse_response(body: &str, episode: &Episode) -> Option<Stream> {
        let response: UnlockResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "unlock API returned an undecodable body");
                return None;
            }
        };

        if !response.success {
            warn!(url = %episode.url, "unlock API could not resolve episode");
            return None;
        }

        response.videos.into_iter().find_map(|video| {
            let title = video.title.unwrap_or_else(|| episode.title.clone());
            Stream::new(title, video.url.into())
        })
    }
}

impl StreamResolver for UnlockApiResolver {
    fn resolve(
        &self,
        fetcher: &dyn Fetcher,
        episode: &Episode,
    ) -> Result<Option<Stream>, ResolveError> {
        debug!(endpoint = %self.endpoint, url = %episode.url, "unlocking episode");
        let body = fetcher.get(&self.endpoint, &[("url", episode.url.as_str())])?;
        Ok(Self::parse_response(&body, episode))
    }
}
