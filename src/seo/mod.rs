//! SEO metadata: per-page copy, the computed metadata of a page, and the
//! document head it is synchronised into.

mod head;
mod pages;

pub use head::{HeadDocument, HeadTag, MetaAttr};
pub use pages::{humanize_slug, page_copy, page_description, page_title, PageCopy};

use crate::i18n::Language;
use crate::routing::Alternate;
use serde_json::Value;

/// Site-wide values every page's metadata is built from.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub name: String,
    /// Absolute base URL without trailing slash (e.g. `https://kids.example`).
    pub base_url: String,
    /// Default Open Graph / Twitter image.
    pub default_image: Option<String>,
}

/// Everything the head of one rendered page must reflect.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub language: Language,
    pub canonical_key: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub alternates: Vec<Alternate>,
    pub og_locale: &'static str,
    pub og_locale_alternates: Vec<&'static str>,
    pub image: Option<String>,
    pub json_ld: Value,
}
