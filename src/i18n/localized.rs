//! Per-language values and the French fallback rule.
//!
//! Content entities, SEO tables and UI dictionaries all store one value per
//! language. Reading them goes through [`with_french_fallback`]: the active
//! language's value if non-empty, else the French value, else nothing.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// One value per supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub fr: T,
    pub en: T,
    pub es: T,
}

impl<T> Localized<T> {
    pub const fn new(fr: T, en: T, es: T) -> Self {
        Self { fr, en, es }
    }

    /// Value stored for `language`, without fallback.
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::Fr => &self.fr,
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &T)> {
        Language::ALL.into_iter().map(move |lang| (lang, self.get(lang)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Localized<U> {
        Localized {
            fr: f(&self.fr),
            en: f(&self.en),
            es: f(&self.es),
        }
    }
}

impl<T: AsRef<str>> Localized<T> {
    /// Text for `language`, falling back to French, then to `""`.
    pub fn text(&self, language: Language) -> &str {
        with_french_fallback(Some(self.get(language).as_ref()), Some(self.fr.as_ref())).unwrap_or("")
    }
}

impl<T: AsRef<str>> Localized<Option<T>> {
    /// Like [`Localized::text`] for fields that may be missing entirely.
    pub fn text_or_empty(&self, language: Language) -> &str {
        with_french_fallback(
            self.get(language).as_ref().map(AsRef::as_ref),
            self.fr.as_ref().map(AsRef::as_ref),
        )
        .unwrap_or("")
    }

    /// Value for `language` only when present and non-empty (no fallback).
    pub fn present(&self, language: Language) -> Option<&str> {
        self.get(language)
            .as_ref()
            .map(AsRef::as_ref)
            .filter(|value| !value.trim().is_empty())
    }
}

/// The shared fallback rule: `active` if non-empty, else `french` if non-empty.
///
/// Callers decide what "nothing" means: entity fields use `""`, the UI
/// dictionary uses the lookup key itself.
pub fn with_french_fallback<'a>(active: Option<&'a str>, french: Option<&'a str>) -> Option<&'a str> {
    active
        .filter(|value| !value.is_empty())
        .or_else(|| french.filter(|value| !value.is_empty()))
}
