//! Navigation pages returned by controllers.
//!
//! A controller never touches the host's rendering surface. It returns a
//! [`Page`] and the host applies it in one go.

use crate::model::Stream;
use crate::projector::{Item, ItemKind};

/// How the host arranges a directory's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Plain item list
    Items,
    /// Rich list showing icons and descriptions
    Contents,
}

/// Everything the host needs to render one navigation event
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: ItemKind,
    pub contents: ContentMode,
    pub title: String,
    pub logo: Option<String>,
    /// Children in display order, pagination items included
    pub items: Vec<Item>,
    /// Media to play, for video and music pages
    pub source: Option<Stream>,
}

impl Page {
    /// An empty directory page.
    pub fn directory(title: impl Into<String>, contents: ContentMode) -> Self {
        Self {
            kind: ItemKind::Directory,
            contents,
            title: title.into(),
            logo: None,
            items: Vec::new(),
            source: None,
        }
    }

    /// A leaf page playing `source`; without a source nothing is playable.
    pub fn playback(title: impl Into<String>, kind: ItemKind, source: Option<Stream>) -> Self {
        Self {
            kind,
            contents: ContentMode::Items,
            title: title.into(),
            logo: None,
            items: Vec::new(),
            source,
        }
    }

    pub fn with_logo(mut self, logo: Option<String>) -> Self {
        self.logo = logo;
        self
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }
}
