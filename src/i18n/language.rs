//! Language type: the closed set of languages the site is published in.
//!
//! Every signal that can carry a language (URL prefix, query string, cookie,
//! browser locale) is parsed through this module. Unrecognized codes come back
//! as `None` and are treated as absent by callers; they are never an error.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Es,
}

impl Language {
    /// All supported languages, in the order alternates and switchers list them.
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Es];

    /// Fallback language for unset or unrecognized values.
    pub const DEFAULT: Language = Language::Fr;

    /// Parse a bare language code (`"fr"`, `"EN"`, `" es "`).
    ///
    /// # Returns
    /// * `Some(Language)` for a supported code
    /// * `None` for anything else, including full locale tags such as `"es-MX"`
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Parse a locale tag by its primary subtag (`"es-MX"`, `"fr_CA.UTF-8"`, `"en"`).
    pub fn from_locale_tag(tag: &str) -> Option<Language> {
        let primary = tag.trim().split(['-', '_', '.', '@']).next()?;
        Self::from_code(primary)
    }

    /// ISO 639-1 code, also used as the URL prefix segment.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Full language metadata from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get().config(*self)
    }

    /// English name of the language (e.g. "French").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g. "Français").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Open Graph locale (e.g. "fr_FR").
    pub fn og_locale(&self) -> &'static str {
        self.config().og_locale
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Language::from_code("fr"), Some(Language::Fr));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("es"), Some(Language::Es));
    }

    #[test]
    fn test_from_code_is_case_insensitive_and_trimmed() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code(" Es "), Some(Language::Es));
    }

    #[test]
    fn test_from_code_unsupported() {
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("es-MX"), None);
    }

    // ==================== from_locale_tag Tests ====================

    #[test]
    fn test_from_locale_tag_primary_subtag() {
        assert_eq!(Language::from_locale_tag("es-MX"), Some(Language::Es));
        assert_eq!(Language::from_locale_tag("fr_CA.UTF-8"), Some(Language::Fr));
        assert_eq!(Language::from_locale_tag("en"), Some(Language::En));
    }

    #[test]
    fn test_from_locale_tag_unsupported() {
        assert_eq!(Language::from_locale_tag("de-DE"), None);
        assert_eq!(Language::from_locale_tag(""), None);
    }

    // ==================== Metadata Tests ====================

    #[test]
    fn test_default_is_french() {
        assert_eq!(Language::default(), Language::Fr);
        assert!(Language::Fr.is_default());
        assert!(!Language::Es.is_default());
    }

    #[test]
    fn test_names() {
        assert_eq!(Language::Fr.name(), "French");
        assert_eq!(Language::Es.native_name(), "Español");
        assert_eq!(Language::En.og_locale(), "en_US");
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::Es.to_string(), "es");
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&Language::En).unwrap();
        assert_eq!(json, "\"en\"");
        let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Language::Fr);
    }
}
