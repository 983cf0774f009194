//! Controllers and routing
//!
//! [`Plugin`] owns the configuration, the transport and the stream resolver,
//! and exposes one controller per navigation level. The routing table built
//! in [`Plugin::new`] maps each level of a navigation URI to its controller;
//! [`Plugin::dispatch`] is the single entry point a host needs.

use crate::PluginError;
use crate::config::PluginConfig;
use crate::extract::{
    ProgramMarkers, extract_episodes, extract_programs, extract_search_results, extract_seasons,
};
use crate::fetch::{Fetcher, HttpFetcher, SiteFetcher};
use crate::identifier::{self, IdentifierError, Level, NavigationUri};
use crate::model::{Category, Episode, Program, SearchQuery, Season};
use crate::page::{ContentMode, Page};
use crate::projector::{ItemKind, Projector, stream_kind};
use crate::resolver::{StreamResolver, resolver_for};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Controller invoked for one navigation level
type Controller<F> = fn(&Plugin<F>, &NavigationUri<'_>) -> Result<Page, PluginError>;

/// Payload of a search URI: a positioned query, or bare query text
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    Positioned(SearchQuery),
    Text(String),
}

impl From<SearchPayload> for SearchQuery {
    fn from(payload: SearchPayload) -> Self {
        match payload {
            SearchPayload::Positioned(search) => search,
            SearchPayload::Text(query) => SearchQuery::new(query),
        }
    }
}

/// Registration record the host shows in its service list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub title: String,
    /// URI of the start page
    pub uri: String,
    pub kind: ItemKind,
    pub enabled: bool,
    pub logo: String,
}

/// The mitele plugin
pub struct Plugin<F: Fetcher> {
    config: PluginConfig,
    fetcher: F,
    resolver: Box<dyn StreamResolver>,
    routes: HashMap<Level, Controller<F>>,
}

impl Plugin<HttpFetcher> {
    /// Creates a plugin talking to the live site over HTTP.
    pub fn with_http(config: PluginConfig) -> Result<Self, PluginError> {
        Self::new(config, HttpFetcher::new())
    }
}

impl<F: Fetcher> Plugin<F> {
    /// Creates a plugin, selecting the stream resolver from `config`.
    pub fn new(config: PluginConfig, fetcher: F) -> Result<Self, PluginError> {
        let resolver = resolver_for(&config)?;
        Ok(Self::with_resolver(config, fetcher, resolver))
    }

    /// Creates a plugin with an explicitly chosen stream resolver.
    pub fn with_resolver(
        config: PluginConfig,
        fetcher: F,
        resolver: Box<dyn StreamResolver>,
    ) -> Self {
        Self {
            config,
            fetcher,
            resolver,
            routes: Self::routing_table(),
        }
    }

    fn routing_table() -> HashMap<Level, Controller<F>> {
        let routes: [(Level, Controller<F>); 6] = [
            (Level::Start, Self::route_start),
            (Level::Category, Self::route_category),
            (Level::Program, Self::route_program),
            (Level::Season, Self::route_season),
            (Level::Video, Self::route_video),
            (Level::Search, Self::route_search),
        ];
        HashMap::from(routes)
    }

    fn route_start(&self, _uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        self.start_page()
    }

    fn route_category(&self, uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        self.category_page(&identifier::decode(uri.require_payload()?)?)
    }

    fn route_program(&self, uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        self.program_page(&identifier::decode(uri.require_payload()?)?)
    }

    fn route_season(&self, uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        self.season_page(&identifier::decode(uri.require_payload()?)?)
    }

    fn route_video(&self, uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        self.video_page(&identifier::decode(uri.require_payload()?)?)
    }

    fn route_search(&self, uri: &NavigationUri<'_>) -> Result<Page, PluginError> {
        let payload: SearchPayload = identifier::decode(uri.require_payload()?)?;
        let search = SearchQuery::from(payload);
        self.search_page(&search)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn site(&self) -> SiteFetcher<'_> {
        SiteFetcher::new(&self.fetcher, &self.config)
    }

    fn projector(&self) -> Projector<'_> {
        Projector::new(&self.config.namespace)
    }

    /// The service descriptor pointing at the start page.
    pub fn service(&self) -> Service {
        Service {
            title: self.config.title.clone(),
            uri: identifier::start_uri(&self.config.namespace),
            kind: ItemKind::Video,
            enabled: true,
            logo: self.config.logo.clone(),
        }
    }

    /// URI that opens the first page of search results for `query`.
    pub fn search_uri(&self, query: &str) -> Result<String, IdentifierError> {
        identifier::uri_for(
            &self.config.namespace,
            Level::Search,
            &SearchQuery::new(query),
        )
    }

    /// Routes a navigation URI to the controller of its level.
    ///
    /// Exactly one controller runs per call and its page is returned as is.
    pub fn dispatch(&self, uri: &str) -> Result<Page, PluginError> {
        let parsed = NavigationUri::parse(uri)?;
        if parsed.namespace != self.config.namespace {
            return Err(IdentifierError::NamespaceMismatch {
                expected: self.config.namespace.clone(),
                found: parsed.namespace.to_string(),
            }
            .into());
        }

        let controller = self
            .routes
            .get(&parsed.level)
            .ok_or_else(|| IdentifierError::UnknownLevel(parsed.level.to_string()))?;

        debug!(level = %parsed.level, "dispatching");
        controller(self, &parsed)
    }

    /// Start page: the static categories followed by the shortcut programs.
    pub fn start_page(&self) -> Result<Page, PluginError> {
        let projector = self.projector();
        let mut page = Page::directory(self.config.title.clone(), ContentMode::Items)
            .with_logo(Some(self.config.logo.clone()));

        for category in &self.config.categories {
            page.push(projector.category_item(category)?);
        }
        for program in &self.config.shortcuts {
            page.push(projector.program_item(program)?);
        }

        Ok(page)
    }

    /// Lists the programs of a category.
    pub fn category_page(&self, category: &Category) -> Result<Page, PluginError> {
        let html = self.site().fetch_category_page(category)?;
        let markers = ProgramMarkers::for_category(self.config.category_listing, category);
        let programs = extract_programs(&html, &markers);
        debug!(category = %category.id, count = programs.len(), "programs extracted");

        let projector = self.projector();
        let mut page = Page::directory(category.title.clone(), ContentMode::Items)
            .with_logo(Some(self.config.logo.clone()));
        for program in &programs {
            page.push(projector.program_item(program)?);
        }

        Ok(page)
    }

    /// Lists the seasons of a program.
    pub fn program_page(&self, program: &Program) -> Result<Page, PluginError> {
        let html = self.site().fetch_program_page(program)?;
        let seasons = extract_seasons(&html)?;
        debug!(program = %program.url, count = seasons.len(), "seasons extracted");

        let projector = self.projector();
        let mut page = Page::directory(program.title.clone(), ContentMode::Contents)
            .with_logo(program.logo.clone());
        for season in &seasons {
            page.push(projector.season_item(season)?);
        }

        Ok(page)
    }

    /// Lists one page of a season's episodes between pagination items.
    pub fn season_page(&self, season: &Season) -> Result<Page, PluginError> {
        let body = self.site().fetch_season_page(season)?;
        let episodes = extract_episodes(&body, &self.config.base_url)?;
        debug!(
            season = %season.id,
            page = season.page.get(),
            count = episodes.len(),
            "episodes extracted"
        );

        let projector = self.projector();
        let mut page = Page::directory(
            format!("{} ({})", season.title, season.page),
            ContentMode::Contents,
        );

        if let Some(previous) = projector.previous_page_item(season)? {
            page.push(previous);
        }
        for episode in &episodes {
            page.push(projector.episode_item(episode)?);
        }
        if !episodes.is_empty() {
            page.push(projector.next_page_item(season)?);
        }

        Ok(page)
    }

    /// Resolves an episode and returns its playback page.
    ///
    /// When the resolver finds nothing playable the page has no source.
    pub fn video_page(&self, episode: &Episode) -> Result<Page, PluginError> {
        let title = episode.title.clone();
        match self.resolver.resolve(&self.fetcher, episode)? {
            Some(stream) => {
                info!(url = %stream.primary(), "Playing");
                let kind = stream_kind(stream.primary());
                Ok(Page::playback(title, kind, Some(stream)))
            }
            None => Ok(Page::playback(title, ItemKind::Video, None)),
        }
    }

    /// Starts a search; the host pulls result pages from the paginator.
    pub fn search(&self, query: &str) -> SearchPaginator<'_, F> {
        self.search_from(&SearchQuery::new(query))
    }

    fn search_from(&self, search: &SearchQuery) -> SearchPaginator<'_, F> {
        SearchPaginator {
            plugin: self,
            query: search.query.clone(),
            next_page: search.page.get(),
            exhausted: false,
        }
    }

    /// Lists one page of search results between pagination items.
    pub fn search_page(&self, search: &SearchQuery) -> Result<Page, PluginError> {
        let projector = self.projector();
        let mut page = Page::directory(
            format!("{}: {} ({})", self.config.title, search.query, search.page),
            ContentMode::Contents,
        )
        .with_logo(Some(self.config.logo.clone()));

        if let Some(previous) = projector.previous_page_item(search)? {
            page.push(previous);
        }
        if self.search_from(search).next_page(&mut page)? {
            page.push(projector.next_page_item(search)?);
        }

        Ok(page)
    }
}

/// Pull-driven search pagination.
///
/// Each call to [`SearchPaginator::next_page`] fetches one more results page.
/// Once a page comes back empty the search is over and later calls return
/// `false` without touching the network.
pub struct SearchPaginator<'p, F: Fetcher> {
    plugin: &'p Plugin<F>,
    query: String,
    next_page: u32,
    exhausted: bool,
}

impl<F: Fetcher> SearchPaginator<'_, F> {
    /// Appends the next results page to `page`.
    ///
    /// Returns whether more results may follow.
    pub fn next_page(&mut self, page: &mut Page) -> Result<bool, PluginError> {
        if self.exhausted {
            return Ok(false);
        }

        let html = self
            .plugin
            .site()
            .fetch_search_page(&self.query, self.next_page)?;
        let results = extract_search_results(&html);
        debug!(
            query = %self.query,
            page = self.next_page,
            count = results.len(),
            "search results"
        );

        if results.is_empty() {
            self.exhausted = true;
            return Ok(false);
        }

        let projector = self.plugin.projector();
        let base_url = &self.plugin.config.base_url;
        for result in results {
            page.push(projector.episode_item(&result.into_episode(base_url))?);
        }

        self.next_page += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryListing, ResolverKind};
    use crate::extract::ExtractionError;
    use crate::identifier::decode;
    use crate::projector::{NEXT_PAGE_TITLE, PREVIOUS_PAGE_TITLE};
    use crate::test_support::CannedFetcher;

    const BASE: &str = "http://www.mitele.es";

    fn plugin(fetcher: CannedFetcher) -> Plugin<CannedFetcher> {
        Plugin::new(PluginConfig::default(), fetcher).unwrap()
    }

    fn payload_of<T: serde::de::DeserializeOwned>(uri: &str) -> T {
        decode(NavigationUri::parse(uri).unwrap().payload.unwrap()).unwrap()
    }

    fn season_uri(page: u32) -> String {
        let mut season = Season::new("5170", "Temporada 7", None);
        for _ in 1..page {
            season = season.next_page();
        }
        identifier::uri_for("mitele", Level::Season, &season).unwrap()
    }

    const EPISODES: &str = r#"{"episodes":[
        {"ID":1,"post_title":"Programa 1","post_subtitle":"Parte 1","post_content":"d1","post_date":"01/01/14","image":"1.jpg","url":"/v/1"},
        {"ID":2,"post_title":"Programa 2","post_subtitle":null,"post_content":"d2","post_date":"02/01/14","image":"2.jpg","url":"/v/2"}
    ]}"#;

    #[test]
    fn test_every_level_is_routed() {
        let plugin = plugin(CannedFetcher::new());
        for level in Level::ALL {
            assert!(plugin.routes.contains_key(&level), "no route for {}", level);
        }
    }

    #[test]
    fn test_service_points_at_start() {
        let plugin = plugin(CannedFetcher::new());
        let service = plugin.service();
        assert_eq!(service.uri, "mitele:start");
        assert_eq!(service.kind, ItemKind::Video);
        assert!(service.enabled);
        assert!(plugin.dispatch(&service.uri).is_ok());
    }

    #[test]
    fn test_start_page() {
        let plugin = plugin(CannedFetcher::new());
        let page = plugin.dispatch("mitele:start").unwrap();

        assert_eq!(page.kind, ItemKind::Directory);
        assert_eq!(page.contents, ContentMode::Items);
        assert_eq!(page.title, "mitele");
        assert_eq!(page.logo.as_deref(), Some(crate::config::DEFAULT_LOGO));
        assert_eq!(page.items.len(), 5);

        let category: Category = payload_of(&page.items[0].uri);
        assert_eq!(category, Category::new("series-online", "Series"));
        let program: Program = payload_of(&page.items[4].uri);
        assert_eq!(program.title, "Mujeres y Hombres y Viceversa");
        assert_eq!(plugin.fetcher().request_count(), 0);
    }

    #[test]
    fn test_category_page() {
        let html = r#"<div id="programas-tv"><ul>
            <li class="Element"><a href="/programas-tv/salvame/" title="Sálvame"><img src="s.jpg"></a></li>
            <li class="Element"><a href="/programas-tv/gh/" title="Gran Hermano"></a></li>
        </ul></div>"#;
        let plugin = plugin(CannedFetcher::new().with(&format!("{}/", BASE), html));
        let uri = identifier::uri_for(
            "mitele",
            Level::Category,
            &Category::new("programas-tv", "Programas"),
        )
        .unwrap();

        let page = plugin.dispatch(&uri).unwrap();
        assert_eq!(page.title, "Programas");
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|i| i.kind == ItemKind::Directory));
        assert_eq!(page.items[0].icon.as_deref(), Some("s.jpg"));
        let program: Program = payload_of(&page.items[1].uri);
        assert_eq!(program.url, "/programas-tv/gh/");
    }

    #[test]
    fn test_section_listing_fetches_category_path() {
        let config = PluginConfig {
            category_listing: CategoryListing::Section,
            ..PluginConfig::default()
        };
        let fetcher = CannedFetcher::new().with(&format!("{}/deportes", BASE), "<html></html>");
        let plugin = Plugin::new(config, fetcher).unwrap();

        let page = plugin
            .category_page(&Category::new("deportes", "Deportes"))
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(plugin.fetcher().requests(), vec![format!("{}/deportes", BASE)]);
    }

    #[test]
    fn test_program_page() {
        let html = r#"<script>$('#t').temporadasBrowser([{"ID":5170,"post_title":"Temporada 7","orden":7}]);</script>"#;
        let plugin = plugin(
            CannedFetcher::new().with(&format!("{}/programas-tv/salvame/", BASE), html),
        );
        let program = Program {
            url: "/programas-tv/salvame/".to_string(),
            title: "Sálvame".to_string(),
            logo: Some("s.jpg".to_string()),
        };

        let page = plugin.program_page(&program).unwrap();
        assert_eq!(page.contents, ContentMode::Contents);
        assert_eq!(page.title, "Sálvame");
        assert_eq!(page.logo.as_deref(), Some("s.jpg"));
        assert_eq!(page.items.len(), 1);
        let season: Season = payload_of(&page.items[0].uri);
        assert_eq!(season.id, "5170");
        assert_eq!(season.page.get(), 1);
    }

    #[test]
    fn test_program_page_with_broken_island() {
        let html = r#".temporadasBrowser([{"ID":1,"x":[1]}])"#;
        let plugin = plugin(CannedFetcher::new().with(&format!("{}/p/", BASE), html));
        let program = Program {
            url: "/p/".to_string(),
            title: "P".to_string(),
            logo: None,
        };
        assert!(matches!(
            plugin.program_page(&program),
            Err(PluginError::Extraction(ExtractionError::Decode { .. }))
        ));
    }

    #[test]
    fn test_first_season_page_has_only_next() {
        let plugin = plugin(CannedFetcher::new().with(
            &format!("{}/temporadasbrowser/getCapitulos/5170/1", BASE),
            EPISODES,
        ));

        let page = plugin.dispatch(&season_uri(1)).unwrap();
        assert_eq!(page.title, "Temporada 7 (1)");
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].title.as_str(), "Programa 1 - Parte 1");
        assert_eq!(page.items[0].kind, ItemKind::Video);
        let episode: Episode = payload_of(&page.items[1].uri);
        assert_eq!(episode.url, "http://www.mitele.es/v/2");

        let next = &page.items[2];
        assert_eq!(next.title.as_str(), NEXT_PAGE_TITLE);
        let season: Season = payload_of(&next.uri);
        assert_eq!(season.page.get(), 2);
    }

    #[test]
    fn test_middle_season_page_has_both_links() {
        let plugin = plugin(CannedFetcher::new().with(
            &format!("{}/temporadasbrowser/getCapitulos/5170/3", BASE),
            EPISODES,
        ));

        let page = plugin.dispatch(&season_uri(3)).unwrap();
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.items[0].title.as_str(), PREVIOUS_PAGE_TITLE);
        assert_eq!(payload_of::<Season>(&page.items[0].uri).page.get(), 2);
        assert_eq!(payload_of::<Season>(&page.items[3].uri).page.get(), 4);
    }

    #[test]
    fn test_empty_season_page_has_no_next() {
        let plugin = plugin(CannedFetcher::new().with(
            &format!("{}/temporadasbrowser/getCapitulos/5170/2", BASE),
            r#"{"episodes":[]}"#,
        ));

        let page = plugin.dispatch(&season_uri(2)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title.as_str(), PREVIOUS_PAGE_TITLE);
    }

    fn unlock_plugin(fetcher: CannedFetcher) -> Plugin<CannedFetcher> {
        let config = PluginConfig {
            resolver: ResolverKind::Unlock,
            unlock_api_url: Some("https://unlock.example/api".to_string()),
            ..PluginConfig::default()
        };
        Plugin::new(config, fetcher).unwrap()
    }

    fn episode(url: &str) -> Episode {
        Episode {
            id: "1".to_string(),
            title: "Programa 1".to_string(),
            subtitle: None,
            description: None,
            date: None,
            icon: None,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_video_page_plays_primary_stream() {
        let fetcher = CannedFetcher::new().with(
            "https://unlock.example/api?url=http://www.mitele.es/v/1",
            r#"{"success":true,"videos":[{"title":"Programa 1","url":["http://cdn/1.mp4","http://cdn/1.m3u8"]}]}"#,
        );
        let plugin = unlock_plugin(fetcher);
        let uri = identifier::uri_for("mitele", Level::Video, &episode("http://www.mitele.es/v/1"))
            .unwrap();

        let page = plugin.dispatch(&uri).unwrap();
        assert_eq!(page.kind, ItemKind::Video);
        assert!(page.is_playable());
        assert_eq!(page.source.unwrap().primary(), "http://cdn/1.mp4");
    }

    #[test]
    fn test_video_page_detects_music() {
        let fetcher = CannedFetcher::new().with(
            "https://unlock.example/api?url=http://www.mitele.es/v/1",
            r#"{"success":true,"videos":[{"url":"http://cdn/1.mp3"}]}"#,
        );
        let plugin = unlock_plugin(fetcher);
        let page = plugin.video_page(&episode("http://www.mitele.es/v/1")).unwrap();
        assert_eq!(page.kind, ItemKind::Music);
    }

    #[test]
    fn test_default_resolver_detects_music_handler() {
        let page_url = "http://www.mitele.es/v/1";
        let fetcher = CannedFetcher::new().with(page_url, "<html></html>").with(
            &format!(
                "{}?modo=1&web={}",
                crate::config::DEFAULT_DESCARGAVIDEOS_URL,
                page_url
            ),
            r#"<a href="/mitele_handler.php?id=42&f=audio:mp3">Descargar</a>"#,
        );
        let plugin = plugin(fetcher);

        let page = plugin.video_page(&episode(page_url)).unwrap();
        assert_eq!(page.kind, ItemKind::Music);
        assert_eq!(
            page.source.unwrap().primary(),
            "http://www.descargavideos.tv/mitele_handler.php?id=42&f=audio:mp3"
        );
    }

    #[test]
    fn test_unresolvable_video_is_not_playable() {
        let fetcher = CannedFetcher::new().with(
            "https://unlock.example/api?url=http://www.mitele.es/v/1",
            r#"{"success":false}"#,
        );
        let plugin = unlock_plugin(fetcher);
        let page = plugin.video_page(&episode("http://www.mitele.es/v/1")).unwrap();
        assert!(!page.is_playable());
        assert_eq!(page.kind, ItemKind::Video);
    }

    const SEARCH_PAGE: &str = r#"<div class="search-results">
        <article class="post">
          <img src="1.jpg"><a href="/programas-tv/salvame/capitulo-1/">Sálvame</a>
          <h4>Capítulo 1</h4><p>Resumen</p>
        </article>
    </div>"#;

    fn search_key(page: u32) -> String {
        format!("{}/buscador/?query=salvame&page={}", BASE, page)
    }

    #[test]
    fn test_search_paginator_terminates_idempotently() {
        let fetcher = CannedFetcher::new()
            .with(&search_key(1), SEARCH_PAGE)
            .with(&search_key(2), SEARCH_PAGE)
            .with(&search_key(3), "<div class=\"search-results\"></div>");
        let plugin = plugin(fetcher);
        let mut page = Page::directory("search", ContentMode::Contents);
        let mut paginator = plugin.search("salvame");

        assert!(paginator.next_page(&mut page).unwrap());
        assert!(paginator.next_page(&mut page).unwrap());
        assert!(!paginator.next_page(&mut page).unwrap());
        assert_eq!(plugin.fetcher().request_count(), 3);

        assert!(!paginator.next_page(&mut page).unwrap());
        assert!(!paginator.next_page(&mut page).unwrap());
        assert_eq!(plugin.fetcher().request_count(), 3);

        assert_eq!(page.items.len(), 2);
        let episode: Episode = payload_of(&page.items[0].uri);
        assert_eq!(episode.url, "http://www.mitele.es/programas-tv/salvame/capitulo-1/");
        assert_eq!(page.items[0].title.as_str(), "Sálvame - Capítulo 1");
    }

    #[test]
    fn test_search_level_dispatch() {
        let plugin = plugin(CannedFetcher::new().with(&search_key(1), SEARCH_PAGE));
        let uri = plugin.search_uri("salvame").unwrap();
        assert_eq!(uri, r#"mitele:search:{"query":"salvame","page":1}"#);

        let page = plugin.dispatch(&uri).unwrap();
        assert_eq!(page.title, "mitele: salvame (1)");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].kind, ItemKind::Video);
        assert_eq!(page.items[1].title.as_str(), NEXT_PAGE_TITLE);
    }

    #[test]
    fn test_search_dispatch_follows_next_item() {
        let plugin = plugin(
            CannedFetcher::new()
                .with(&search_key(1), SEARCH_PAGE)
                .with(&search_key(2), SEARCH_PAGE)
                .with(&search_key(3), "<div class=\"search-results\"></div>"),
        );

        let first = plugin.dispatch(&plugin.search_uri("salvame").unwrap()).unwrap();
        let next = &first.items.last().unwrap().uri;
        let search: SearchQuery = payload_of(next);
        assert_eq!(search.page.get(), 2);

        let second = plugin.dispatch(next).unwrap();
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.items[0].title.as_str(), PREVIOUS_PAGE_TITLE);
        assert_eq!(payload_of::<SearchQuery>(&second.items[0].uri).page.get(), 1);
        assert_eq!(second.items[1].kind, ItemKind::Video);

        let third = plugin.dispatch(&second.items[2].uri).unwrap();
        assert_eq!(third.items.len(), 1);
        assert_eq!(third.items[0].title.as_str(), PREVIOUS_PAGE_TITLE);
        assert_eq!(
            plugin.fetcher().requests(),
            vec![search_key(1), search_key(2), search_key(3)]
        );
    }

    #[test]
    fn test_search_dispatch_accepts_bare_query_text() {
        let plugin = plugin(CannedFetcher::new().with(&search_key(1), SEARCH_PAGE));
        let page = plugin.dispatch("mitele:search:\"salvame\"").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(plugin.fetcher().requests(), vec![search_key(1)]);
    }

    #[test]
    fn test_dispatch_errors() {
        let plugin = plugin(CannedFetcher::new());

        assert!(matches!(
            plugin.dispatch("youtube:start"),
            Err(PluginError::Identifier(IdentifierError::NamespaceMismatch { .. }))
        ));
        assert!(matches!(
            plugin.dispatch("mitele:program:{broken"),
            Err(PluginError::Identifier(IdentifierError::Decode(_)))
        ));
        assert!(matches!(
            plugin.dispatch("mitele:season"),
            Err(PluginError::Identifier(IdentifierError::MissingPayload(Level::Season)))
        ));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let plugin = plugin(CannedFetcher::new());
        let uri = identifier::uri_for(
            "mitele",
            Level::Category,
            &Category::new("deportes", "Deportes"),
        )
        .unwrap();
        assert!(matches!(plugin.dispatch(&uri), Err(PluginError::Fetch(_))));
    }
}
