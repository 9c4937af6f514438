//! HTTP surface of the localized site.
//!
//! Every GET path that is not one of the fixed endpoints goes through
//! [`page`]: unprefixed entry paths are redirected to their localized form,
//! a `?lang=` naming another language redirects to the same page in that
//! language, and everything else renders the page shell in the language of
//! its path prefix. The language cookie is the durable preference store.

use crate::config::Config;
use crate::content::ContentEntity;
use crate::i18n::{
    preferred_browser_locale, Language, LanguageResolver, LanguageSignals, PreferenceStore,
    QueryOverride,
};
use crate::routing::{
    localize_entry_path, AppPath, CanonicalMetadataBuilder, LinkRenderer, NavLink, RouteTable,
};
use crate::seo::{HeadDocument, PageMetadata, SiteInfo};
use crate::sitemap;
use axum::{
    extract::State,
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, Method, StatusCode, Uri,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cookie::{Cookie, SameSite};
use maud::{html, Markup, DOCTYPE};
use serde_json::json;
use std::sync::Arc;
use time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Main navigation: link target and UI string key.
const NAV_ITEMS: [(&str, &str); 10] = [
    ("/", "nav.home"),
    ("/songs", "nav.songs"),
    ("/games", "nav.games"),
    ("/characters", "nav.characters"),
    ("/activities", "nav.activities"),
    ("/videos", "nav.videos"),
    ("/blog", "nav.blog"),
    ("/parents", "nav.parents"),
    ("/about", "nav.about"),
    ("/contact", "nav.contact"),
];

const FOOTER_ITEMS: [(&str, &str); 3] = [
    ("/privacy", "footer.privacy"),
    ("/terms", "footer.terms"),
    ("/newsletter", "footer.newsletter"),
];

pub struct AppState {
    pub config: Config,
    pub table: RouteTable,
    pub site: SiteInfo,
    sitemap_xml: String,
    robots_txt: String,
}

impl AppState {
    /// Build the state, rendering the sitemap once for the given content.
    pub fn new(config: Config, table: RouteTable, entities: &[ContentEntity]) -> Self {
        let site = config.site_info();
        let sitemap_xml = sitemap::generate(&table, &site.base_url, entities);
        let robots_txt = sitemap::robots_txt(&site.base_url);
        Self {
            config,
            table,
            site,
            sitemap_xml,
            robots_txt,
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .fallback(page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn sitemap_xml(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        state.sitemap_xml.clone(),
    )
}

async fn robots_txt(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.robots_txt.clone(),
    )
}

// ==================== Language Cookie ====================

/// Language preference carried by a cookie.
///
/// Reads the request's `Cookie` header; a `save` is turned into a
/// `Set-Cookie` value for the response.
#[derive(Debug, Clone)]
pub struct CookiePreferenceStore {
    name: String,
    incoming: Option<String>,
    outgoing: Option<String>,
}

impl CookiePreferenceStore {
    pub fn from_headers(headers: &HeaderMap, name: &str) -> Self {
        let incoming = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| parse_cookie(header, name));

        Self {
            name: name.to_string(),
            incoming,
            outgoing: None,
        }
    }

    /// Cookie to send back when the preference was written during this request.
    pub fn set_cookie(&self) -> Option<Cookie<'static>> {
        self.outgoing.as_ref().map(|code| {
            Cookie::build((self.name.clone(), code.clone()))
                .path("/")
                .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
                .same_site(SameSite::Lax)
                .build()
        })
    }
}

impl PreferenceStore for CookiePreferenceStore {
    fn load(&self) -> Option<String> {
        self.outgoing.clone().or_else(|| self.incoming.clone())
    }

    fn save(&mut self, code: &str) {
        self.outgoing = Some(code.to_string());
    }
}

fn parse_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

// ==================== Pages ====================

async fn page(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let raw = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let path = AppPath::parse(raw);
    let store = CookiePreferenceStore::from_headers(&headers, &state.config.lang_cookie_name);
    let browser_locale = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(preferred_browser_locale);

    let Some(path_language) = path.language_prefix() else {
        let resolver = LanguageResolver::resolve_entry(store, browser_locale);
        let target = localize_entry_path(&state.table, &path, resolver.active());
        debug!("Entry {} -> {} ({:?})", raw, target, resolver.source());
        return found(&target, resolver.store().set_cookie());
    };

    let query_param = state.config.lang_query_param.as_str();
    let query_language = path.query_param(query_param);
    let query_override = state.config.query_override();
    let mut resolver = LanguageResolver::resolve(
        store,
        LanguageSignals {
            query: query_language.as_deref(),
            browser_locale,
        },
        query_override,
    );

    let builder = CanonicalMetadataBuilder::new(&state.table, &state.site);
    let pathname = path.pathname();
    let requested = query_language.as_deref().and_then(Language::from_code);

    if let Some(target_language) = requested.filter(|language| *language != path_language) {
        let mut target = builder.switch_language_path(&pathname, target_language);
        // A transient choice rides along in the query so the next page does not persist it
        match query_override {
            QueryOverride::Persist => target.push_str(path.without_query_param(query_param).suffix()),
            QueryOverride::Transient => target.push_str(path.suffix()),
        }
        debug!("Query switches {} -> {}", raw, target);
        return found(&target, resolver.store().set_cookie());
    }

    // Under the transient policy the resolver already took the path language
    // from the query without writing it
    let transient = query_override == QueryOverride::Transient && requested == Some(path_language);
    if !transient {
        resolver.set_active(path_language);
    }

    let metadata = builder.page_metadata(&pathname, resolver.active());
    let html = render_page(&state, &resolver, &builder, &pathname, &metadata);

    let mut response = Html(html.into_string()).into_response();
    append_cookie(&mut response, resolver.store().set_cookie());
    response
}

/// Page shell: synced head, main navigation, language switcher and footer.
fn render_page<S: PreferenceStore>(
    state: &AppState,
    resolver: &LanguageResolver<S>,
    builder: &CanonicalMetadataBuilder<'_>,
    pathname: &str,
    metadata: &PageMetadata,
) -> Markup {
    let mut head = HeadDocument::with_defaults();
    head.sync(metadata);

    let active = resolver.active();
    let links = LinkRenderer::new(&state.table, active, pathname);
    let nav = nav_links(&links, resolver, &NAV_ITEMS);
    let footer = nav_links(&links, resolver, &FOOTER_ITEMS);

    html! {
        (DOCTYPE)
        html lang=(resolver.document_lang()) {
            head { (head.render()) }
            body {
                nav {
                    @for link in &nav { (nav_link(link)) }
                }
                nav aria-label=(resolver.translate("switcher.label")) {
                    @for language in Language::ALL {
                        a href=(builder.switch_language_path(pathname, language))
                            hreflang=(language.code())
                            lang=(language.code())
                            aria-current=[(language == active).then_some("true")] {
                            (language.native_name())
                        }
                    }
                }
                main {
                    h1 { (metadata.title) }
                    p { (metadata.description) }
                }
                footer {
                    @for link in &footer { (nav_link(link)) }
                    p { (resolver.translate("footer.rights")) }
                }
            }
        }
    }
}

fn nav_links<S: PreferenceStore>(
    links: &LinkRenderer<'_>,
    resolver: &LanguageResolver<S>,
    items: &[(&str, &str)],
) -> Vec<NavLink> {
    items
        .iter()
        .map(|(to, key)| links.nav_link(to, resolver.translate(key)))
        .collect()
}

fn nav_link(link: &NavLink) -> Markup {
    html! {
        a href=(link.href) aria-current=[link.active.then_some("page")] { (link.label) }
    }
}

// ==================== Responses ====================

/// `302 Found` to `location`.
fn found(location: &str, cookie: Option<Cookie<'static>>) -> Response {
    let Ok(value) = HeaderValue::from_str(location) else {
        warn!("Refusing to redirect to invalid location {:?}", location);
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(LOCATION, value);
    append_cookie(&mut response, cookie);
    response
}

fn append_cookie(response: &mut Response, cookie: Option<Cookie<'static>>) {
    if let Some(cookie) = cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
}
