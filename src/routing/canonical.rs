//! Canonical URL and hreflang alternate computation.
//!
//! Given the path of the page being rendered, work out which canonical route
//! it is, then derive the canonical URL and the equivalent URL in every
//! supported language. Unknown slugs pass through as their own canonical key.

use crate::i18n::Language;
use crate::routing::{AppPath, RouteTable};
use crate::seo::{self, PageMetadata, SiteInfo};
use serde::Serialize;
use serde_json::json;

/// `hreflang` value of the catch-all alternate.
pub const X_DEFAULT: &str = "x-default";

/// One `<link rel="alternate" hreflang=...>` target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// The route a rendered path corresponds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
    /// Language of the path prefix, French when missing or unrecognized.
    pub language: Language,
    /// Canonical key; empty for the home page.
    pub canonical_key: String,
    /// Segments after the matched slug, joined with `/`.
    pub rest: Option<String>,
}

impl CurrentRoute {
    pub fn is_home(&self) -> bool {
        self.canonical_key.is_empty()
    }
}

/// Resolve the canonical route of a pathname such as `/en/activities/coloring-pages`.
///
/// The longest run of segments that is a known slug in the path's language
/// wins; when none matches, the first segment is the canonical key.
pub fn resolve_current_route(table: &RouteTable, pathname: &str) -> CurrentRoute {
    let (prefix, path) = AppPath::parse(pathname).strip_language();
    let language = prefix.unwrap_or(Language::DEFAULT);
    let segments = path.segments();

    if segments.is_empty() {
        return CurrentRoute {
            language,
            canonical_key: String::new(),
            rest: None,
        };
    }

    let (canonical_key, consumed) = (1..=segments.len())
        .rev()
        .find_map(|n| {
            table
                .resolve_canonical_key(&segments[..n].join("/"), language)
                .map(|key| (key.to_string(), n))
        })
        .unwrap_or_else(|| (segments[0].clone(), 1));

    let rest = &segments[consumed..];
    CurrentRoute {
        language,
        canonical_key,
        rest: (!rest.is_empty()).then(|| rest.join("/")),
    }
}

/// Canonical key of a pathname (see [`resolve_current_route`]).
pub fn resolve_current_canonical_key(table: &RouteTable, pathname: &str) -> String {
    resolve_current_route(table, pathname).canonical_key
}

/// Builds canonical URLs, alternates and full page metadata.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalMetadataBuilder<'a> {
    table: &'a RouteTable,
    site: &'a SiteInfo,
}

impl<'a> CanonicalMetadataBuilder<'a> {
    pub fn new(table: &'a RouteTable, site: &'a SiteInfo) -> Self {
        Self { table, site }
    }

    pub fn resolve_current_route(&self, pathname: &str) -> CurrentRoute {
        resolve_current_route(self.table, pathname)
    }

    /// Site-relative path of a canonical route in `language`.
    pub fn localized_path(&self, canonical_key: &str, rest: Option<&str>, language: Language) -> String {
        if canonical_key.is_empty() {
            return format!("/{}", language.code());
        }

        let slug = self
            .table
            .localize(canonical_key, language)
            .unwrap_or(canonical_key);
        match rest.filter(|rest| !rest.is_empty()) {
            Some(rest) => format!("/{}/{}/{}", language.code(), slug, rest),
            None => format!("/{}/{}", language.code(), slug),
        }
    }

    /// Absolute URL of a canonical route in `language`.
    pub fn alternate_url(&self, canonical_key: &str, rest: Option<&str>, language: Language) -> String {
        format!(
            "{}{}",
            self.site.base_url,
            self.localized_path(canonical_key, rest, language)
        )
    }

    /// One alternate per supported language plus `x-default` (French).
    pub fn build_alternates(&self, canonical_key: &str, rest: Option<&str>) -> Vec<Alternate> {
        let mut alternates: Vec<Alternate> = Language::ALL
            .into_iter()
            .map(|language| Alternate {
                hreflang: language.code().to_string(),
                href: self.alternate_url(canonical_key, rest, language),
            })
            .collect();

        alternates.push(Alternate {
            hreflang: X_DEFAULT.to_string(),
            href: self.alternate_url(canonical_key, rest, Language::DEFAULT),
        });
        alternates
    }

    /// Full head metadata for the page at `pathname`, rendered in `active`.
    ///
    /// `active` must be the language after resolution settled; the path is
    /// only used to find the canonical route.
    pub fn page_metadata(&self, pathname: &str, active: Language) -> PageMetadata {
        let route = self.resolve_current_route(pathname);
        let rest = route.rest.as_deref();

        let page_title = seo::page_title(&route.canonical_key, rest, active);
        let title = if page_title.is_empty() {
            self.site.name.clone()
        } else {
            format!("{} | {}", page_title, self.site.name)
        };
        let description = seo::page_description(&route.canonical_key, active);
        let canonical_url = self.alternate_url(&route.canonical_key, rest, active);

        let json_ld = json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": title,
            "description": description,
            "url": canonical_url,
            "inLanguage": active.code(),
            "isPartOf": {
                "@type": "WebSite",
                "name": self.site.name,
                "url": self.site.base_url,
            },
        });

        PageMetadata {
            language: active,
            canonical_key: route.canonical_key.clone(),
            title,
            description,
            canonical_url,
            alternates: self.build_alternates(&route.canonical_key, rest),
            og_locale: active.og_locale(),
            og_locale_alternates: Language::ALL
                .into_iter()
                .filter(|language| *language != active)
                .map(|language| language.og_locale())
                .collect(),
            image: self.site.default_image.clone(),
            json_ld,
        }
    }

    /// Same page in another language, for the language switcher.
    pub fn switch_language_path(&self, pathname: &str, target: Language) -> String {
        let route = self.resolve_current_route(pathname);
        self.localized_path(&route.canonical_key, route.rest.as_deref(), target)
    }
}
