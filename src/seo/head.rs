//! Document head model and its synchronisation with page metadata.
//!
//! [`HeadDocument::sync`] can be called any number of times for the same or
//! different pages: single-valued tags are updated in place (or created when
//! missing), hreflang alternates are removed and rebuilt as a group, and there
//! is never more than one JSON-LD block.

use crate::routing::Alternate;
use crate::seo::PageMetadata;
use maud::{html, Markup, PreEscaped, Render};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    /// `<meta name=...>`
    Name,
    /// `<meta property=...>` (Open Graph)
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadTag {
    Charset(String),
    Title(String),
    Meta {
        attr: MetaAttr,
        key: String,
        content: String,
    },
    Link {
        rel: String,
        hreflang: Option<String>,
        href: String,
    },
    /// Serialized `application/ld+json` payload.
    JsonLd(String),
}

impl HeadTag {
    fn meta(attr: MetaAttr, key: &str, content: &str) -> Self {
        HeadTag::Meta {
            attr,
            key: key.to_string(),
            content: content.to_string(),
        }
    }

    fn is_meta(&self, wanted_attr: MetaAttr, wanted_key: &str) -> bool {
        matches!(self, HeadTag::Meta { attr, key, .. } if *attr == wanted_attr && key == wanted_key)
    }

    fn is_link(&self, wanted_rel: &str) -> bool {
        matches!(self, HeadTag::Link { rel, .. } if rel == wanted_rel)
    }

    fn is_alternate(&self) -> bool {
        matches!(self, HeadTag::Link { rel, hreflang: Some(_), .. } if rel == "alternate")
    }
}

const OG_LOCALE_ALTERNATE: &str = "og:locale:alternate";

/// Ordered list of head tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
    tags: Vec<HeadTag>,
}

impl HeadDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head with charset and viewport, the tags every page starts from.
    pub fn with_defaults() -> Self {
        let mut head = Self::new();
        head.tags.push(HeadTag::Charset("utf-8".to_string()));
        head.set_meta(MetaAttr::Name, "viewport", "width=device-width, initial-scale=1");
        head
    }

    pub fn tags(&self) -> &[HeadTag] {
        &self.tags
    }

    pub fn title(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            HeadTag::Title(title) => Some(title.as_str()),
            _ => None,
        })
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            HeadTag::Meta { content, .. } if tag.is_meta(attr, key) => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn canonical(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            HeadTag::Link { href, .. } if tag.is_link("canonical") => Some(href.as_str()),
            _ => None,
        })
    }

    /// `(hreflang, href)` pairs in document order.
    pub fn alternates(&self) -> Vec<(&str, &str)> {
        self.tags
            .iter()
            .filter_map(|tag| match tag {
                HeadTag::Link {
                    hreflang: Some(hreflang),
                    href,
                    ..
                } if tag.is_alternate() => Some((hreflang.as_str(), href.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn json_ld(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            HeadTag::JsonLd(payload) => Some(payload.as_str()),
            _ => None,
        })
    }

    pub fn set_title(&mut self, title: &str) {
        self.upsert(HeadTag::Title(title.to_string()), |tag| {
            matches!(tag, HeadTag::Title(_))
        });
    }

    pub fn set_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        self.upsert(HeadTag::meta(attr, key, content), |tag| tag.is_meta(attr, key));
    }

    pub fn remove_meta(&mut self, attr: MetaAttr, key: &str) {
        self.tags.retain(|tag| !tag.is_meta(attr, key));
    }

    pub fn set_canonical(&mut self, href: &str) {
        let tag = HeadTag::Link {
            rel: "canonical".to_string(),
            hreflang: None,
            href: href.to_string(),
        };
        self.upsert(tag, |tag| tag.is_link("canonical"));
    }

    /// Remove every hreflang alternate, then insert the new set.
    pub fn replace_alternates(&mut self, alternates: &[Alternate]) {
        let tags = alternates.iter().map(|alternate| HeadTag::Link {
            rel: "alternate".to_string(),
            hreflang: Some(alternate.hreflang.clone()),
            href: alternate.href.clone(),
        });
        self.replace_group(HeadTag::is_alternate, tags);
    }

    pub fn set_json_ld(&mut self, value: &Value) {
        self.upsert(HeadTag::JsonLd(value.to_string()), |tag| {
            matches!(tag, HeadTag::JsonLd(_))
        });
    }

    /// Bring every SEO tag in line with `meta`.
    pub fn sync(&mut self, meta: &PageMetadata) {
        self.set_title(&meta.title);
        self.set_meta(MetaAttr::Name, "description", &meta.description);

        self.set_meta(MetaAttr::Property, "og:type", "website");
        self.set_meta(MetaAttr::Property, "og:title", &meta.title);
        self.set_meta(MetaAttr::Property, "og:description", &meta.description);
        self.set_meta(MetaAttr::Property, "og:url", &meta.canonical_url);
        self.set_meta(MetaAttr::Property, "og:locale", meta.og_locale);
        let locale_alternates = meta
            .og_locale_alternates
            .iter()
            .map(|locale| HeadTag::meta(MetaAttr::Property, OG_LOCALE_ALTERNATE, locale));
        self.replace_group(
            |tag| tag.is_meta(MetaAttr::Property, OG_LOCALE_ALTERNATE),
            locale_alternates,
        );

        self.set_meta(MetaAttr::Name, "twitter:card", "summary_large_image");
        self.set_meta(MetaAttr::Name, "twitter:title", &meta.title);
        self.set_meta(MetaAttr::Name, "twitter:description", &meta.description);

        match &meta.image {
            Some(image) => {
                self.set_meta(MetaAttr::Property, "og:image", image);
                self.set_meta(MetaAttr::Name, "twitter:image", image);
            }
            None => {
                self.remove_meta(MetaAttr::Property, "og:image");
                self.remove_meta(MetaAttr::Name, "twitter:image");
            }
        }

        self.set_canonical(&meta.canonical_url);
        self.replace_alternates(&meta.alternates);
        self.set_json_ld(&meta.json_ld);
    }

    /// Render the tags as HTML.
    pub fn render(&self) -> Markup {
        html! {
            @for tag in &self.tags {
                (tag)
            }
        }
    }

    /// Replace the first tag matching `matches` in place and drop any later
    /// duplicates; append when none exists.
    fn upsert(&mut self, tag: HeadTag, matches: impl Fn(&HeadTag) -> bool) {
        match self.tags.iter().position(&matches) {
            Some(idx) => {
                self.tags[idx] = tag;
                let mut seen = 0;
                self.tags.retain(|existing| {
                    if matches(existing) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.tags.push(tag),
        }
    }

    fn replace_group(
        &mut self,
        matches: impl Fn(&HeadTag) -> bool,
        tags: impl IntoIterator<Item = HeadTag>,
    ) {
        let anchor = self.tags.iter().position(&matches);
        self.tags.retain(|tag| !matches(tag));
        let at = anchor.unwrap_or(self.tags.len());
        self.tags.splice(at..at, tags);
    }
}

impl Render for HeadTag {
    fn render(&self) -> Markup {
        match self {
            HeadTag::Charset(charset) => html! { meta charset=(charset); },
            HeadTag::Title(title) => html! { title { (title) } },
            HeadTag::Meta {
                attr: MetaAttr::Name,
                key,
                content,
            } => html! { meta name=(key) content=(content); },
            HeadTag::Meta {
                attr: MetaAttr::Property,
                key,
                content,
            } => html! { meta property=(key) content=(content); },
            HeadTag::Link { rel, hreflang, href } => {
                html! { link rel=(rel) hreflang=[hreflang] href=(href); }
            }
            // Serialized JSON is not HTML-escaped; only `</` could end the script early
            HeadTag::JsonLd(payload) => html! {
                script type="application/ld+json" { (PreEscaped(payload.replace("</", "<\\/"))) }
            },
        }
    }
}
