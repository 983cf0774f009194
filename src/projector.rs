//! Projection of domain records into host display items.

use crate::identifier::{IdentifierError, Level, uri_for};
use crate::model::{Category, Episode, Program, SearchQuery, Season};
use serde::Serialize;
use std::fmt;

/// How the host should present an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    Video,
    Music,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemKind::Directory => "directory",
            ItemKind::Video => "video",
            ItemKind::Music => "music",
        })
    }
}

/// Text that may carry the host's `<font>` style markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText(String);

impl RichText {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The text with all markup removed, for hosts without rich text.
    pub fn to_plain(&self) -> String {
        nanohtml2text::html2text(&self.0).trim().to_string()
    }
}

/// One entry of a navigation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Navigation URI the host invokes when the item is selected
    pub uri: String,
    pub kind: ItemKind,
    pub title: RichText,
    pub icon: Option<String>,
    pub description: Option<RichText>,
}

pub const PREVIOUS_PAGE_TITLE: &str = "Página anterior";
pub const NEXT_PAGE_TITLE: &str = "Página siguiente";

/// A navigation record addressing one page of a longer listing
pub trait Paged: Serialize + Sized {
    /// Level the record's pagination items route to
    const LEVEL: Level;

    fn next_page(&self) -> Self;
    fn previous_page(&self) -> Option<Self>;
}

impl Paged for Season {
    const LEVEL: Level = Level::Season;

    fn next_page(&self) -> Self {
        Season::next_page(self)
    }

    fn previous_page(&self) -> Option<Self> {
        Season::previous_page(self)
    }
}

impl Paged for SearchQuery {
    const LEVEL: Level = Level::Search;

    fn next_page(&self) -> Self {
        SearchQuery::next_page(self)
    }

    fn previous_page(&self) -> Option<Self> {
        SearchQuery::previous_page(self)
    }
}

/// Maps records to items addressed in one URI namespace.
pub struct Projector<'a> {
    namespace: &'a str,
}

impl<'a> Projector<'a> {
    pub fn new(namespace: &'a str) -> Self {
        Self { namespace }
    }

    fn directory(
        &self,
        level: Level,
        record: &impl Serialize,
        title: &str,
        icon: Option<String>,
    ) -> Result<Item, IdentifierError> {
        Ok(Item {
            uri: uri_for(self.namespace, level, record)?,
            kind: ItemKind::Directory,
            title: RichText::new(title),
            icon,
            description: None,
        })
    }

    pub fn category_item(&self, category: &Category) -> Result<Item, IdentifierError> {
        self.directory(Level::Category, category, &category.title, None)
    }

    pub fn program_item(&self, program: &Program) -> Result<Item, IdentifierError> {
        self.directory(Level::Program, program, &program.title, program.logo.clone())
    }

    pub fn season_item(&self, season: &Season) -> Result<Item, IdentifierError> {
        self.directory(Level::Season, season, &season.title, None)
    }

    pub fn episode_item(&self, episode: &Episode) -> Result<Item, IdentifierError> {
        Ok(Item {
            uri: uri_for(self.namespace, Level::Video, episode)?,
            kind: ItemKind::Video,
            title: RichText::new(episode_title(episode)),
            icon: episode.icon.clone(),
            description: Some(RichText::new(episode_description(episode))),
        })
    }

    /// Head item leading one page back, absent on the first page.
    pub fn previous_page_item<P: Paged>(
        &self,
        record: &P,
    ) -> Result<Option<Item>, IdentifierError> {
        record
            .previous_page()
            .map(|previous| self.directory(P::LEVEL, &previous, PREVIOUS_PAGE_TITLE, None))
            .transpose()
    }

    /// Tail item leading one page further.
    pub fn next_page_item<P: Paged>(&self, record: &P) -> Result<Item, IdentifierError> {
        self.directory(P::LEVEL, &record.next_page(), NEXT_PAGE_TITLE, None)
    }
}

/// `title - subtitle` when the episode has a non-empty subtitle.
pub fn episode_title(episode: &Episode) -> String {
    match episode.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(subtitle) => format!("{} - {}", episode.title, subtitle),
        None => episode.title.clone(),
    }
}

/// Optional highlighted date line followed by the raw description.
pub fn episode_description(episode: &Episode) -> String {
    let mut description = String::new();
    if let Some(date) = episode.date.as_deref().filter(|d| !d.is_empty()) {
        description.push_str(r#"<font size="4">Fecha: </font>"#);
        description.push_str(&format!(r##"<font size="4" color="#daa520">{}</font>"##, date));
        description.push('\n');
    }
    if let Some(text) = &episode.description {
        description.push_str(text);
    }
    description
}

/// Picks the item kind of a resolved stream from its trailing type marker.
///
/// The marker is whatever follows the last `:` of the whole URL, so handler
/// URLs can carry it in their query (`...?id=42:mp3`). A path ending in
/// `.mp3` counts as well. `mp3` plays as music, anything else as video.
pub fn stream_kind(url: &str) -> ItemKind {
    let marker = url.rsplit(':').next().unwrap_or_default();
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path.rsplit(['.', '/']).next().unwrap_or_default();

    if marker.eq_ignore_ascii_case("mp3") || extension.eq_ignore_ascii_case("mp3") {
        ItemKind::Music
    } else {
        ItemKind::Video
    }
}
