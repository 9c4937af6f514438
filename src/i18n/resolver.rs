//! Active-language resolution.
//!
//! A [`LanguageResolver`] is created once per render cycle. It settles the
//! active language from the competing signals in strict priority order
//! (query string, saved preference, browser locale, French) and is the only
//! writer of that value afterwards. Everything that renders links or SEO tags
//! reads the language from the resolver, after it has settled.

use crate::i18n::strings;
use crate::i18n::Language;
use tracing::debug;

/// Durable storage for the last chosen language (cookie, local storage, ...).
pub trait PreferenceStore {
    /// Raw stored value, if any. Unrecognized values are ignored by the resolver.
    fn load(&self) -> Option<String>;

    /// Persist a language code.
    fn save(&mut self, code: &str);
}

/// In-process preference store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    value: Option<String>,
    writes: usize,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(code: &str) -> Self {
        Self {
            value: Some(code.to_string()),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Number of `save` calls received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, code: &str) {
        self.value = Some(code.to_string());
        self.writes += 1;
    }
}

/// What happens to the saved preference when the query string names a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryOverride {
    /// The query language becomes the saved preference when it differs from it.
    #[default]
    Persist,
    /// The query language applies to the current render only.
    Transient,
}

/// Which signal produced the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    Query,
    Stored,
    Browser,
    Default,
    /// Set through [`LanguageResolver::set_active`].
    Explicit,
}

/// Per-request language signals other than the saved preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageSignals<'a> {
    /// Raw value of the language query parameter.
    pub query: Option<&'a str>,
    /// Browser locale tag (e.g. "es-MX").
    pub browser_locale: Option<&'a str>,
}

/// Owner of the active language for one render cycle.
#[derive(Debug)]
pub struct LanguageResolver<S> {
    store: S,
    current: Language,
    source: LanguageSource,
    document_lang: &'static str,
    query_override: QueryOverride,
}

impl<S: PreferenceStore> LanguageResolver<S> {
    /// Resolve the active language: query, then saved preference, then
    /// browser locale, then French. First recognized signal wins.
    pub fn resolve(store: S, signals: LanguageSignals<'_>, query_override: QueryOverride) -> Self {
        let stored = store.load().as_deref().and_then(Language::from_code);

        let (current, source) = if let Some(lang) = signals.query.and_then(Language::from_code) {
            (lang, LanguageSource::Query)
        } else if let Some(lang) = stored {
            (lang, LanguageSource::Stored)
        } else if let Some(lang) = signals.browser_locale.and_then(Language::from_locale_tag) {
            (lang, LanguageSource::Browser)
        } else {
            (Language::DEFAULT, LanguageSource::Default)
        };

        debug!("Resolved language {} from {:?}", current, source);

        let mut resolver = Self {
            store,
            current,
            source,
            document_lang: current.code(),
            query_override,
        };

        if source == LanguageSource::Query
            && stored != Some(current)
            && query_override == QueryOverride::Persist
        {
            resolver.store.save(current.code());
        }

        resolver
    }

    /// Resolve for an entry point without a language prefix.
    ///
    /// The query signal is not consulted here: saved preference, then browser
    /// locale, then French.
    pub fn resolve_entry(store: S, browser_locale: Option<&str>) -> Self {
        Self::resolve(
            store,
            LanguageSignals {
                query: None,
                browser_locale,
            },
            QueryOverride::default(),
        )
    }

    pub fn active(&self) -> Language {
        self.current
    }

    pub fn source(&self) -> LanguageSource {
        self.source
    }

    /// Value of the document-level `lang` attribute.
    pub fn document_lang(&self) -> &'static str {
        self.document_lang
    }

    /// Switch the active language and persist it.
    pub fn set_active(&mut self, language: Language) {
        self.apply(language, LanguageSource::Explicit);
        self.persist();
    }

    /// Promote a language named by a changed query string.
    ///
    /// One-directional: a missing or unrecognized value leaves the active
    /// language alone. Returns `true` when the active language changed.
    pub fn reconcile_query(&mut self, query: Option<&str>) -> bool {
        let Some(language) = query.and_then(Language::from_code) else {
            return false;
        };
        if language == self.current {
            return false;
        }

        debug!("Query string switches language {} -> {}", self.current, language);
        self.apply(language, LanguageSource::Query);
        if self.query_override == QueryOverride::Persist {
            self.persist();
        }
        true
    }

    /// Translate a UI key in the active language.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        strings::translate(self.current, key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn apply(&mut self, language: Language, source: LanguageSource) {
        self.current = language;
        self.source = source;
        self.document_lang = language.code();
    }

    fn persist(&mut self) {
        let code = self.current.code();
        if self.store.load().as_deref() != Some(code) {
            self.store.save(code);
        }
    }
}

/// Pick the browser's preferred locale from an `Accept-Language` header.
///
/// Returns the tag with the highest quality value (first one on ties);
/// wildcards, `q=0` and non-finite quality values are skipped, and values
/// above 1 count as 1.
pub fn preferred_browser_locale(header: &str) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;

    for part in header.split(',') {
        let mut segments = part.trim().split(';');
        let tag = segments.next().unwrap_or("").trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let mut q = 1.0_f64;
        for segment in segments {
            if let Some(value) = segment.trim().strip_prefix("q=") {
                if let Ok(parsed) = value.trim().parse::<f64>() {
                    q = parsed;
                }
            }
        }
        if !q.is_finite() || q <= 0.0 {
            continue;
        }
        let q = q.min(1.0);

        match best {
            Some((_, best_q)) if best_q >= q => {}
            _ => best = Some((tag, q)),
        }
    }

    best.map(|(tag, _)| tag)
}
