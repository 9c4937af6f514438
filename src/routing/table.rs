//! Route table: canonical route keys and their localized slugs.
//!
//! The table is built once at start-up and never changes. Construction checks
//! every invariant the lookups rely on, so a bad table fails loudly at boot
//! instead of producing wrong links at render time.

use crate::i18n::{Language, Localized};
use std::collections::HashMap;
use thiserror::Error;

/// Sitemap grouping of a static route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCategory {
    /// Top-level listing pages (songs, games, ...).
    Section,
    /// A single page under a section (one game, one activity).
    Detail,
    /// About, contact and similar informational pages.
    Info,
    /// Privacy, terms.
    Legal,
}

/// One canonical application route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Stable, never-localized identifier (e.g. `"games/shark-rhythm"`).
    pub key: &'static str,
    pub slugs: Localized<&'static str>,
    pub category: RouteCategory,
}

impl RouteEntry {
    pub const fn new(
        key: &'static str,
        fr: &'static str,
        en: &'static str,
        es: &'static str,
        category: RouteCategory,
    ) -> Self {
        Self {
            key,
            slugs: Localized::new(fr, en, es),
            category,
        }
    }

    pub fn slug(&self, language: Language) -> &'static str {
        self.slugs.get(language)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route key must not be empty")]
    EmptyKey,

    #[error("duplicate route key '{0}'")]
    DuplicateKey(String),

    #[error("route '{key}' has an empty {language} slug")]
    EmptySlug { key: String, language: Language },

    #[error("route '{key}' must be lowercase and slash-trimmed, got '{value}'")]
    NotNormalized { key: String, value: String },

    #[error("{language} slug '{slug}' is used by both '{first}' and '{second}'")]
    DuplicateSlug {
        language: Language,
        slug: String,
        first: String,
        second: String,
    },

    #[error("{language} slug '{slug}' of route '{key}' would be re-localized through route '{other}'")]
    UnstableSlug {
        language: Language,
        slug: String,
        key: String,
        other: String,
    },
}

/// Bidirectional canonical key / localized slug lookup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_key: HashMap<&'static str, usize>,
    by_slug: HashMap<(Language, String), usize>,
}

impl RouteTable {
    /// Build and validate a table.
    ///
    /// # Errors
    /// * duplicate or empty keys, empty slugs
    /// * keys or slugs that are not lowercase or carry leading/trailing slashes
    /// * two keys sharing a slug in the same language
    /// * a slug whose text (or first segment) is another route's key with a
    ///   different slug in that language, which would make link rewriting
    ///   non-idempotent
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_slug = HashMap::with_capacity(entries.len() * Language::ALL.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(RouteTableError::EmptyKey);
            }
            check_normalized(entry.key, entry.key)?;
            if by_key.insert(entry.key, idx).is_some() {
                return Err(RouteTableError::DuplicateKey(entry.key.to_string()));
            }

            for (language, &slug) in entry.slugs.iter() {
                if slug.is_empty() {
                    return Err(RouteTableError::EmptySlug {
                        key: entry.key.to_string(),
                        language,
                    });
                }
                check_normalized(entry.key, slug)?;
                if let Some(first) = by_slug.insert((language, slug.to_string()), idx) {
                    return Err(RouteTableError::DuplicateSlug {
                        language,
                        slug: slug.to_string(),
                        first: entries[first].key.to_string(),
                        second: entry.key.to_string(),
                    });
                }
            }
        }

        let table = Self {
            entries,
            by_key,
            by_slug,
        };
        table.check_stable_slugs()?;
        Ok(table)
    }

    /// The site's route table.
    pub fn site() -> Result<Self, RouteTableError> {
        Self::new(site_routes())
    }

    /// Localized slug for a canonical key, `None` for unknown keys.
    pub fn localize(&self, key: &str, language: Language) -> Option<&'static str> {
        self.get(key).map(|entry| entry.slug(language))
    }

    /// Canonical key for a localized slug.
    ///
    /// Matching ignores case and leading/trailing slashes. `None` means the
    /// slug is a passthrough (e.g. a blog article).
    pub fn resolve_canonical_key(&self, slug: &str, language: Language) -> Option<&'static str> {
        let normalized = slug.trim_matches('/').to_lowercase();
        self.by_slug
            .get(&(language, normalized))
            .map(|&idx| self.entries[idx].key)
    }

    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_stable_slugs(&self) -> Result<(), RouteTableError> {
        for entry in &self.entries {
            for (language, &slug) in entry.slugs.iter() {
                let first_segment = slug.split('/').next().unwrap_or(slug);
                let candidate = if self.by_key.contains_key(slug) {
                    slug
                } else {
                    first_segment
                };

                if let Some(other) = self.get(candidate) {
                    if other.slug(language) != candidate {
                        return Err(RouteTableError::UnstableSlug {
                            language,
                            slug: slug.to_string(),
                            key: entry.key.to_string(),
                            other: other.key.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_normalized(key: &str, value: &str) -> Result<(), RouteTableError> {
    let normalized = value == value.to_lowercase()
        && !value.starts_with('/')
        && !value.ends_with('/')
        && !value.contains("//");
    if normalized {
        Ok(())
    } else {
        Err(RouteTableError::NotNormalized {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Static routes of the site. The home page is the empty path and has no entry.
pub fn site_routes() -> Vec<RouteEntry> {
    use RouteCategory::*;

    vec![
        // Sections
        RouteEntry::new("songs", "chansons", "songs", "canciones", Section),
        RouteEntry::new("games", "jeux", "games", "juegos", Section),
        RouteEntry::new("characters", "personnages", "characters", "personajes", Section),
        RouteEntry::new("activities", "activites", "activities", "actividades", Section),
        RouteEntry::new("videos", "videos", "videos", "videos", Section),
        RouteEntry::new("blog", "blog", "blog", "blog", Section),
        RouteEntry::new("parents", "parents", "parents", "padres", Section),
        // Games
        RouteEntry::new("games/lola-memory", "jeux/lola-memory", "games/lola-memory", "juegos/lola-memory", Detail),
        RouteEntry::new("games/shark-rhythm", "jeux/rythme-requin", "games/shark-rhythm", "juegos/ritmo-tiburon", Detail),
        RouteEntry::new("games/puzzle", "jeux/casse-tete", "games/puzzle", "juegos/rompecabezas", Detail),
        // Activities
        RouteEntry::new("colorings", "activites/coloriages", "activities/coloring-pages", "actividades/dibujos-para-colorear", Detail),
        RouteEntry::new("crafts", "activites/bricolages", "activities/crafts", "actividades/manualidades", Detail),
        RouteEntry::new("printables", "activites/a-imprimer", "activities/printables", "actividades/imprimibles", Detail),
        // Information
        RouteEntry::new("about", "a-propos", "about", "sobre-nosotros", Info),
        RouteEntry::new("contact", "contact", "contact", "contacto", Info),
        RouteEntry::new("faq", "faq", "faq", "preguntas-frecuentes", Info),
        RouteEntry::new("newsletter", "infolettre", "newsletter", "boletin", Info),
        RouteEntry::new("educators", "enseignants", "teachers", "docentes", Info),
        // Legal
        RouteEntry::new("privacy", "confidentialite", "privacy", "privacidad", Legal),
        RouteEntry::new("terms", "mentions-legales", "terms", "terminos", Legal),
    ]
}
