//! Domain records for the mitele browse hierarchy.
//!
//! Every record that takes part in navigation derives `Serialize` and
//! `Deserialize`, because the host hands it back to us only as the encoded
//! payload of a navigation URI.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Page number every freshly derived season starts at.
pub const FIRST_PAGE: NonZeroU32 = NonZeroU32::MIN;

fn first_page() -> NonZeroU32 {
    FIRST_PAGE
}

/// A site section such as "Series" or "Programas".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Site section slug, e.g. `series-online`
    pub id: String,
    /// Display title
    pub title: String,
}

impl Category {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A program listed inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Site-relative path of the program page
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A season of a program, addressed by its numeric site id.
///
/// `page` is the only navigation state the plugin carries; it travels inside
/// the season identifier and is never stored anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default = "first_page")]
    pub page: NonZeroU32,
}

impl Season {
    /// Creates a season positioned on its first page.
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: Option<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
            page: FIRST_PAGE,
        }
    }

    /// The same season one page further.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// The same season one page back, or `None` on the first page.
    pub fn previous_page(&self) -> Option<Self> {
        let page = NonZeroU32::new(self.page.get() - 1)?;
        Some(Self {
            page,
            ..self.clone()
        })
    }
}

/// A playable episode or clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Long-form description, may contain markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Absolute URL of the page the video plays on
    pub url: String,
}

/// A free-text search positioned on one results page.
///
/// Like [`Season::page`], the page number lives only in the search
/// identifier the host hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "first_page")]
    pub page: NonZeroU32,
}

impl SearchQuery {
    /// Creates a search positioned on its first results page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: FIRST_PAGE,
        }
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn previous_page(&self) -> Option<Self> {
        let page = NonZeroU32::new(self.page.get() - 1)?;
        Some(Self {
            page,
            ..self.clone()
        })
    }
}

/// One hit of a free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub icon: String,
    pub url: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl SearchResult {
    /// Turns the hit into a playable episode so it routes to the video level.
    ///
    /// Relative result URLs are made absolute against `base_url`.
    pub fn into_episode(self, base_url: &str) -> Episode {
        let url = if self.url.starts_with("http://") || self.url.starts_with("https://") {
            self.url
        } else {
            format!("{}{}", base_url, self.url)
        };

        Episode {
            id: url.clone(),
            title: self.title,
            subtitle: non_empty(self.subtitle),
            description: non_empty(self.description),
            date: None,
            icon: non_empty(self.icon),
            url,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Playable media URLs for one episode.
///
/// The first URL is the canonical source, the rest are fallbacks. A `Stream`
/// is never constructed without at least one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub title: String,
    urls: Vec<String>,
}

impl Stream {
    /// Builds a stream from its candidate URLs, or `None` when there are none.
    pub fn new(title: impl Into<String>, urls: Vec<String>) -> Option<Self> {
        if urls.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            urls,
        })
    }

    /// The canonical stream URL.
    pub fn primary(&self) -> &str {
        &self.urls[0]
    }

    /// Fallback sources, in the order the resolver reported them.
    pub fn alternatives(&self) -> &[String] {
        &self.urls[1..]
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}
