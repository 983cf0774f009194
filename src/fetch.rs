//! Remote resource fetching
//!
//! Every navigation level is backed by exactly one blocking GET. The HTTP
//! transport sits behind the [`Fetcher`] trait so that page building can be
//! exercised against canned bodies.

use crate::config::{CategoryListing, PluginConfig};
use crate::model::{Category, Program, Season};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching a remote resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read as text
    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// A blocking text fetcher
pub trait Fetcher {
    /// Performs one GET request and returns the body as text.
    ///
    /// # Arguments
    ///
    /// * `url` - Fully qualified URL without query string
    /// * `query` - Query parameters, appended in the given order
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// [`Fetcher`] backed by a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        debug!(url, ?query, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Joins a base URL and a site-relative path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Builds site URLs for each navigation level and fetches them.
pub struct SiteFetcher<'a> {
    fetcher: &'a dyn Fetcher,
    config: &'a PluginConfig,
}

impl<'a> SiteFetcher<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, config: &'a PluginConfig) -> Self {
        Self { fetcher, config }
    }

    /// URL of the page that lists a category's programs.
    pub fn category_url(&self, category: &Category) -> String {
        match self.config.category_listing {
            CategoryListing::Homepage => join_url(&self.config.base_url, ""),
            CategoryListing::Section => join_url(&self.config.base_url, &category.id),
        }
    }

    pub fn program_url(&self, program: &Program) -> String {
        if program.url.starts_with("http://") || program.url.starts_with("https://") {
            return program.url.clone();
        }
        join_url(&self.config.base_url, &program.url)
    }

    pub fn season_url(&self, season: &Season) -> String {
        join_url(
            &self.config.base_url,
            &format!("temporadasbrowser/getCapitulos/{}/{}", season.id, season.page),
        )
    }

    pub fn search_url(&self) -> String {
        join_url(&self.config.base_url, &self.config.search_path)
    }

    pub fn fetch_category_page(&self, category: &Category) -> Result<String, FetchError> {
        self.fetcher.get(&self.category_url(category), &[])
    }

    pub fn fetch_program_page(&self, program: &Program) -> Result<String, FetchError> {
        self.fetcher.get(&self.program_url(program), &[])
    }

    pub fn fetch_season_page(&self, season: &Season) -> Result<String, FetchError> {
        self.fetcher.get(&self.season_url(season), &[])
    }

    pub fn fetch_search_page(&self, query: &str, page: u32) -> Result<String, FetchError> {
        let page = page.to_string();
        self.fetcher
            .get(&self.search_url(), &[("query", query), ("page", page.as_str())])
    }
}
