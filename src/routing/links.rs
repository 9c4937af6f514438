//! Localized link rewriting.
//!
//! [`localize_href`] is the only place an in-app link is turned into a
//! `/<lang>/<slug>` path. Plain anchors and navigation links both go through
//! [`LinkRenderer`], which delegates to it.

use crate::i18n::Language;
use crate::routing::{AppPath, RouteTable};
use regex::Regex;
use std::sync::OnceLock;

// Scheme (`https:`, `mailto:`, `tel:`...), protocol-relative `//`, or in-page `#`
static EXTERNAL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Whether a link target must be left untouched.
pub fn is_external(to: &str) -> bool {
    let regex = EXTERNAL_REGEX
        .get_or_init(|| Regex::new(r"^\s*(?:[a-zA-Z][a-zA-Z0-9+.\-]*:|//|#)").unwrap());
    regex.is_match(to)
}

/// Rewrite an application-relative link for `language`.
///
/// Accepts canonical paths (`/about`), already-prefixed paths
/// (`/en/about`), and paths with a `?query` or `#fragment`. External links and
/// in-page anchors are returned unchanged. Total and idempotent:
/// `localize_href(t, &localize_href(t, p, l), l) == localize_href(t, p, l)`.
pub fn localize_href(table: &RouteTable, to: &str, language: Language) -> String {
    if is_external(to) {
        return to.to_string();
    }

    let (_, path) = AppPath::parse(to).strip_language();
    let mut href = localized_pathname(table, &path, language);
    href.push_str(path.suffix());
    href
}

/// Localize an unprefixed entry path.
///
/// Only the normalized path is used, so the result always starts with
/// `/<lang>`. Paths starting with a canonical key go through
/// [`localize_href`]; otherwise a clean slug of any language (as listed in
/// the sitemap) is mapped back to its key first, trying `language` before the
/// others.
pub fn localize_entry_path(table: &RouteTable, path: &AppPath, language: Language) -> String {
    let (_, path) = path.clone().strip_language();
    let segments = path.segments();
    let starts_with_key = table.get(&path.joined()).is_some()
        || segments.first().is_some_and(|first| table.get(first).is_some());

    let canonical = if segments.is_empty() || starts_with_key {
        None
    } else {
        std::iter::once(language)
            .chain(Language::ALL.into_iter().filter(|other| *other != language))
            .find_map(|candidate| {
                (1..=segments.len()).rev().find_map(|n| {
                    table
                        .resolve_canonical_key(&segments[..n].join("/"), candidate)
                        .map(|key| (key, n))
                })
            })
    };

    let mut target = match canonical {
        Some((key, consumed)) => {
            let mut rebuilt = vec![key.to_string()];
            rebuilt.extend(segments[consumed..].iter().cloned());
            format!("/{}", rebuilt.join("/"))
        }
        None => path.pathname(),
    };
    target.push_str(path.suffix());
    localize_href(table, &target, language)
}

/// `/<lang>/<localized slug>[/<rest>]` for a path already stripped of its
/// language prefix.
fn localized_pathname(table: &RouteTable, path: &AppPath, language: Language) -> String {
    let code = language.code();
    let Some((first, rest)) = path.segments().split_first() else {
        return format!("/{}", code);
    };

    let joined = path.joined();
    if let Some(slug) = table.localize(&joined, language) {
        return format!("/{}/{}", code, slug);
    }

    if let Some(slug) = table.localize(first, language) {
        return if rest.is_empty() {
            format!("/{}/{}", code, slug)
        } else {
            format!("/{}/{}/{}", code, slug, rest.join("/"))
        };
    }

    format!("/{}/{}", code, joined)
}

/// A rendered navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    /// Whether the link points at the current page or one of its children.
    pub active: bool,
}

/// Renders links for one page in one language.
#[derive(Debug, Clone)]
pub struct LinkRenderer<'a> {
    table: &'a RouteTable,
    language: Language,
    current: AppPath,
}

impl<'a> LinkRenderer<'a> {
    /// `current_path` is the path of the page being rendered (e.g. `/fr/jeux/lola-memory`).
    pub fn new(table: &'a RouteTable, language: Language, current_path: &str) -> Self {
        Self {
            table,
            language,
            current: AppPath::parse(current_path),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Plain anchor target.
    pub fn href(&self, to: &str) -> String {
        localize_href(self.table, to, self.language)
    }

    /// Navigation entry with active-state highlighting.
    pub fn nav_link(&self, to: &str, label: impl Into<String>) -> NavLink {
        let href = self.href(to);
        let active = self.is_current(&href);
        NavLink {
            href,
            label: label.into(),
            active,
        }
    }

    fn is_current(&self, href: &str) -> bool {
        if is_external(href) {
            return false;
        }

        let target = AppPath::parse(href);
        let target = target.segments();
        let current = self.current.segments();

        let same = |a: &String, b: &String| a.eq_ignore_ascii_case(b);

        // The home link (`/<lang>`) only matches the home page itself
        if target.len() <= 1 {
            return target.len() == current.len()
                && target.iter().zip(current).all(|(a, b)| same(a, b));
        }

        current.len() >= target.len() && target.iter().zip(current).all(|(a, b)| same(a, b))
    }
}
