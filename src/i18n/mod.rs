//! Internationalization (i18n) module for the trilingual site.
//!
//! # Architecture
//!
//! - `language`: closed `Language` enum and signal parsing
//! - `registry`: Single source of truth for per-language metadata
//! - `localized`: `Localized<T>` per-language records and the French fallback rule
//! - `strings`: UI dictionaries and `translate`
//! - `resolver`: active-language resolution and persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use localized_site::i18n::{LanguageResolver, LanguageSignals, MemoryPreferenceStore, QueryOverride};
//!
//! let signals = LanguageSignals { query: Some("en"), browser_locale: Some("es-MX") };
//! let resolver = LanguageResolver::resolve(MemoryPreferenceStore::new(), signals, QueryOverride::Persist);
//! assert_eq!(resolver.active().code(), "en");
//! ```

mod language;
mod localized;
mod registry;
mod resolver;
mod strings;

pub use language::Language;
pub use localized::{with_french_fallback, Localized};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::{
    preferred_browser_locale, LanguageResolver, LanguageSignals, LanguageSource,
    MemoryPreferenceStore, PreferenceStore, QueryOverride,
};
pub use strings::translate;
