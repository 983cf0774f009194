//! Stream resolution
//!
//! Turning an episode page into playable media URLs is delegated to an
//! external service. Which service is used has changed over the life of the
//! site, so every strategy implements [`StreamResolver`] and the active one
//! is picked from the configuration.

mod descargavideos;
mod unlock;

pub use descargavideos::DescargaVideosResolver;
pub use unlock::UnlockApiResolver;

use crate::config::{ConfigError, PluginConfig, ResolverKind};
use crate::fetch::{FetchError, Fetcher};
use crate::model::{Episode, Stream};
use thiserror::Error;

/// Errors that can occur while resolving a stream
///
/// A service that answers but cannot unlock the episode is not an error;
/// resolvers report that as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolution service could not be reached
    #[error("Stream resolution request failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Trait for services that resolve an episode into playable streams.
pub trait StreamResolver {
    /// Resolves the streams of an episode.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Transport used for every request the strategy makes
    /// * `episode` - The episode whose page should be unlocked
    ///
    /// # Returns
    ///
    /// The resolved stream, or `None` when the service reports nothing
    /// playable. Callers treat `None` as final for that episode.
    fn resolve(
        &self,
        fetcher: &dyn Fetcher,
        episode: &Episode,
    ) -> Result<Option<Stream>, ResolveError>;
}

/// Builds the resolver selected by the configuration.
pub fn resolver_for(config: &PluginConfig) -> Result<Box<dyn StreamResolver>, ConfigError> {
    let resolver: Box<dyn StreamResolver> = match config.resolver {
        ResolverKind::Unlock => {
            let endpoint = config
                .unlock_api_url
                .clone()
                .ok_or(ConfigError::MissingUnlockEndpoint)?;
            Box::new(UnlockApiResolver::new(endpoint))
        }
        ResolverKind::DescargaVideos => {
            Box::new(DescargaVideosResolver::new(config.descargavideos_url.clone()))
        }
    };
    Ok(resolver)
}
