//! mitele - Browse and play mitele.es from a media center
//!
//! This library scrapes the site's category, program and season pages into a
//! uniform navigation model, and resolves episodes into playable streams
//! through an external unlocking service.
//!
//! A host drives it with navigation URIs of the form
//! `<namespace>:<level>:<payload>` and renders the [`Page`] each call returns:
//!
//! ```no_run
//! use mitele::{Plugin, PluginConfig};
//!
//! let plugin = Plugin::with_http(PluginConfig::default()).unwrap();
//! let start = plugin.dispatch(&plugin.service().uri).unwrap();
//! for item in &start.items {
//!     println!("{} -> {}", item.title.to_plain(), item.uri);
//! }
//! ```

mod config;
mod extract;
mod fetch;
mod identifier;
mod model;
mod page;
mod plugin;
mod projector;
mod resolver;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use config::ConfigError;
pub use extract::ExtractionError;
pub use fetch::FetchError;
pub use identifier::IdentifierError;
pub use resolver::ResolveError;

pub use config::{CategoryListing, PluginConfig, ResolverKind};
pub use extract::{
    ProgramMarkers, extract_episodes, extract_programs, extract_search_results, extract_seasons,
};
pub use fetch::{Fetcher, HttpFetcher, SiteFetcher, join_url};
pub use identifier::{Level, NavigationUri, decode, encode, start_uri, uri_for};
pub use model::{
    Category, Episode, FIRST_PAGE, Program, SearchQuery, SearchResult, Season, Stream,
};
pub use page::{ContentMode, Page};
pub use plugin::{Plugin, SearchPaginator, Service};
pub use projector::{
    Item, ItemKind, NEXT_PAGE_TITLE, PREVIOUS_PAGE_TITLE, Paged, Projector, RichText,
    stream_kind,
};
pub use resolver::{DescargaVideosResolver, StreamResolver, UnlockApiResolver, resolver_for};

use thiserror::Error;

/// Top-level error type for plugin operations
#[derive(Debug, Error)]
pub enum PluginError {
    /// Malformed or foreign navigation identifier
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Error while fetching a site resource
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error while decoding located page data
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error while resolving a stream
    #[error("Stream resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Invalid plugin configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
