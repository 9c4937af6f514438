//! Language registry: Single source of truth for per-language metadata.
//!
//! The set of languages is closed (see [`Language`]); the registry only holds
//! the presentation data attached to each of them. It uses a singleton pattern
//! with `OnceLock` to ensure thread-safe initialization and access.

use crate::i18n::Language;
use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub language: Language,

    /// ISO 639-1 language code (e.g., "fr", "en", "es")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "English", "Spanish")
    pub name: &'static str,

    /// Native name of the language, shown in the language switcher
    pub native_name: &'static str,

    /// Open Graph locale (e.g., "fr_FR")
    pub og_locale: &'static str,

    /// Whether this is the fallback language (only one should be true)
    pub is_default: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get the metadata for a language.
    ///
    /// Every `Language` variant has exactly one entry, so this cannot miss.
    pub fn config(&self, language: Language) -> &LanguageConfig {
        &self.languages[language as usize]
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the code is supported
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        Language::from_code(code).map(|language| self.config(language))
    }

    /// Get all languages, in `Language::ALL` order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default (fallback) language configuration.
    pub fn default_language(&self) -> &LanguageConfig {
        self.config(Language::DEFAULT)
    }
}

/// Default language configurations.
///
/// Order must match the declaration order of `Language`.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            language: Language::Fr,
            code: "fr",
            name: "French",
            native_name: "Français",
            og_locale: "fr_FR",
            is_default: true,
        },
        LanguageConfig {
            language: Language::En,
            code: "en",
            name: "English",
            native_name: "English",
            og_locale: "en_US",
            is_default: false,
        },
        LanguageConfig {
            language: Language::Es,
            code: "es",
            name: "Spanish",
            native_name: "Español",
            og_locale: "es_ES",
            is_default: false,
        },
    ]
}
