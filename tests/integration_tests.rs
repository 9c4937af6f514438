//! Integration tests for the localized site
//!
//! These tests exercise routing, language resolution and SEO metadata
//! together, the way a page render uses them.

use proptest::prelude::*;
use url::Url;

use localized_site::i18n::{
    preferred_browser_locale, translate, Language, LanguageResolver, LanguageSignals,
    LanguageSource, MemoryPreferenceStore, QueryOverride,
};
use localized_site::routing::{
    localize_entry_path, localize_href, resolve_current_canonical_key, AppPath,
    CanonicalMetadataBuilder, LinkRenderer, RouteTable, X_DEFAULT,
};
use localized_site::seo::{HeadDocument, SiteInfo};

// ==================== Test Helpers ====================

fn table() -> RouteTable {
    RouteTable::site().expect("site routes are valid")
}

fn site() -> SiteInfo {
    SiteInfo {
        name: "Lola & Friends".to_string(),
        base_url: "https://kids.example".to_string(),
        default_image: Some("https://kids.example/og.png".to_string()),
    }
}

// ==================== Language Resolution Tests ====================

#[test]
fn test_query_beats_stored_and_browser() {
    let resolver = LanguageResolver::resolve(
        MemoryPreferenceStore::with_value("en"),
        LanguageSignals {
            query: Some("es"),
            browser_locale: Some("fr-CA"),
        },
        QueryOverride::Persist,
    );

    assert_eq!(resolver.active(), Language::Es);
    assert_eq!(resolver.source(), LanguageSource::Query);
    assert_eq!(resolver.document_lang(), "es");
    assert_eq!(resolver.store().value(), Some("es"));
}

#[test]
fn test_stored_beats_browser() {
    let resolver = LanguageResolver::resolve(
        MemoryPreferenceStore::with_value("en"),
        LanguageSignals {
            query: Some("de"),
            browser_locale: Some("es-MX"),
        },
        QueryOverride::Persist,
    );

    assert_eq!(resolver.active(), Language::En);
    assert_eq!(resolver.store().writes(), 0);
}

#[test]
fn test_accept_language_feeds_browser_signal() {
    let locale = preferred_browser_locale("de-DE;q=0.9, es-MX;q=0.95, *;q=0.1");
    let resolver = LanguageResolver::resolve_entry(MemoryPreferenceStore::new(), locale);
    assert_eq!(resolver.active(), Language::Es);
    assert_eq!(resolver.source(), LanguageSource::Browser);
}

#[test]
fn test_unsupported_everything_falls_back_to_french() {
    let resolver = LanguageResolver::resolve(
        MemoryPreferenceStore::with_value("de"),
        LanguageSignals {
            query: Some("it"),
            browser_locale: Some("de-DE"),
        },
        QueryOverride::Persist,
    );
    assert_eq!(resolver.active(), Language::Fr);
    assert_eq!(resolver.source(), LanguageSource::Default);
}

// ==================== Link Rewriting Tests ====================

#[test]
fn test_entry_link_keeps_query() {
    assert_eq!(
        localize_href(&table(), "/games/lola-memory?songId=42", Language::Fr),
        "/fr/jeux/lola-memory?songId=42"
    );
}

#[test]
fn test_unknown_section_passes_through() {
    assert_eq!(
        localize_href(&table(), "/blog/mi-articulo", Language::Es),
        "/es/blog/mi-articulo"
    );
    assert_eq!(
        localize_href(&table(), "/unknown/page", Language::En),
        "/en/unknown/page"
    );
}

#[test]
fn test_home_with_unsupported_browser_goes_to_french() {
    let resolver = LanguageResolver::resolve_entry(MemoryPreferenceStore::new(), Some("de-DE"));
    assert_eq!(localize_href(&table(), "/", resolver.active()), "/fr");
}

#[test]
fn test_relocalizing_prefixed_link() {
    assert_eq!(
        localize_href(&table(), "/fr/about#equipe", Language::Es),
        "/es/sobre-nosotros#equipe"
    );
}

#[test]
fn test_external_links_untouched() {
    let table = table();
    for link in ["https://youtube.com/@lola", "mailto:hi@kids.example", "//cdn.example/x.png", "#top"] {
        assert_eq!(localize_href(&table, link, Language::En), link);
    }
}

// ==================== Full Page Flow Tests ====================

#[test]
fn test_page_render_flow() {
    let table = table();
    let site = site();

    let mut resolver = LanguageResolver::resolve(
        MemoryPreferenceStore::with_value("fr"),
        LanguageSignals::default(),
        QueryOverride::Persist,
    );
    resolver.set_active(Language::En);

    let builder = CanonicalMetadataBuilder::new(&table, &site);
    let metadata = builder.page_metadata("/en/activities/coloring-pages", resolver.active());
    assert_eq!(metadata.canonical_key, "colorings");
    assert_eq!(
        metadata.canonical_url,
        "https://kids.example/en/activities/coloring-pages"
    );

    let mut head = HeadDocument::with_defaults();
    head.sync(&metadata);
    head.sync(&metadata);
    assert_eq!(head.alternates().len(), 4);
    assert_eq!(head.canonical(), Some(metadata.canonical_url.as_str()));

    let links = LinkRenderer::new(&table, resolver.active(), "/en/activities/coloring-pages");
    let nav = links.nav_link("/activities", resolver.translate("nav.activities"));
    assert_eq!(nav.href, "/en/activities");
    assert_eq!(nav.label, "Activities");
    assert!(nav.active);
}

#[test]
fn test_language_switch_keeps_page() {
    let table = table();
    let site = site();
    let builder = CanonicalMetadataBuilder::new(&table, &site);

    assert_eq!(
        builder.switch_language_path("/fr/jeux/rythme-requin", Language::Es),
        "/es/juegos/ritmo-tiburon"
    );
    assert_eq!(builder.switch_language_path("/en", Language::Fr), "/fr");
}

// ==================== Translation Tests ====================

#[test]
fn test_translate_is_total() {
    for language in Language::ALL {
        assert!(!translate(language, "nav.home").is_empty());
        assert_eq!(translate(language, "no.such.key"), "no.such.key");
    }
    assert_eq!(translate(Language::Es, "footer.newsletter"), "Infolettre");
}

// ==================== Property Tests ====================

fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("games".to_string()),
        Just("jeux".to_string()),
        Just("lola-memory".to_string()),
        Just("activities".to_string()),
        Just("coloring-pages".to_string()),
        Just("fr".to_string()),
        Just("en".to_string()),
        Just("es".to_string()),
        "[a-z0-9-]{1,8}",
    ];
    let suffix = prop_oneof![
        Just(String::new()),
        Just("?songId=42".to_string()),
        Just("#top".to_string()),
        Just("?a=1&b=2#x".to_string()),
    ];
    (prop::collection::vec(segment, 0..4), suffix)
        .prop_map(|(segments, suffix)| format!("/{}{}", segments.join("/"), suffix))
}

fn language_strategy() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Fr), Just(Language::En), Just(Language::Es)]
}

proptest! {
    #[test]
    fn prop_localize_href_is_idempotent(path in path_strategy(), language in language_strategy()) {
        let table = table();
        let once = localize_href(&table, &path, language);
        let twice = localize_href(&table, &once, language);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_localized_links_carry_language_prefix(path in path_strategy(), language in language_strategy()) {
        let href = localize_href(&table(), &path, language);
        let prefix = format!("/{}", language.code());
        let prefixed = href == prefix
            || ["/", "?", "#"]
                .iter()
                .any(|separator| href.starts_with(&format!("{}{}", prefix, separator)));
        prop_assert!(prefixed, "{} lacks the {} prefix", href, prefix);
    }

    #[test]
    fn prop_entry_paths_stay_on_site(
        slashes in "/{1,3}",
        path in path_strategy(),
        language in language_strategy(),
    ) {
        let raw = format!("{}{}", slashes, path.trim_start_matches('/'));
        let href = localize_entry_path(&table(), &AppPath::parse(&raw), language);
        let prefix = format!("/{}", language.code());
        prop_assert!(href.starts_with(&prefix), "{} -> {}", raw, href);
        prop_assert!(!href.starts_with("//"), "{} -> {}", raw, href);
    }

    #[test]
    fn prop_alternates_are_complete_absolute_urls(path in path_strategy(), language in language_strategy()) {
        let table = table();
        let site = site();
        let builder = CanonicalMetadataBuilder::new(&table, &site);
        let pathname = localize_href(&table, &path, language);
        let pathname = pathname.split(['?', '#']).next().unwrap_or("/").to_string();

        let metadata = builder.page_metadata(&pathname, language);
        prop_assert_eq!(metadata.alternates.len(), 4);
        for (alternate, code) in metadata.alternates.iter().zip(["fr", "en", "es", X_DEFAULT]) {
            prop_assert_eq!(alternate.hreflang.as_str(), code);
            prop_assert!(Url::parse(&alternate.href).is_ok());
        }
        prop_assert_eq!(&metadata.alternates[3].href, &metadata.alternates[0].href);
    }
}

#[test]
fn test_every_route_round_trips() {
    let table = table();
    for entry in table.entries() {
        for language in Language::ALL {
            let href = localize_href(&table, &format!("/{}", entry.key), language);
            assert_eq!(resolve_current_canonical_key(&table, &href), entry.key);
        }
    }
}
