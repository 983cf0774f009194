//! Canned-response fetcher for unit tests.

use crate::fetch::{FetchError, Fetcher};
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves bodies registered per request key and records every request.
///
/// A request key is the URL followed by `?k=v&k=v` when query parameters are
/// present, in the order the caller passed them. Unknown keys answer 404.
#[derive(Default)]
pub(crate) struct CannedFetcher {
    responses: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, body: &str) -> Self {
        self.responses.insert(key.to_string(), body.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn request_key(url: &str, query: &[(&str, &str)]) -> String {
        if query.is_empty() {
            return url.to_string();
        }
        let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", url, params.join("&"))
    }
}

impl Fetcher for CannedFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let key = Self::request_key(url, query);
        self.requests.borrow_mut().push(key.clone());
        self.responses
            .get(&key)
            .cloned()
            .ok_or(FetchError::Status { url: key, status: 404 })
    }
}
