//! Normalized application path model.
//!
//! Every path the router looks at goes through [`AppPath::parse`]: duplicate
//! and trailing slashes disappear, the `?query#fragment` suffix is kept
//! verbatim, and a leading language segment can be split off.

use crate::i18n::Language;

/// An application-relative path split into segments and a raw suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppPath {
    segments: Vec<String>,
    /// `?query` and/or `#fragment`, exactly as written (empty when absent).
    suffix: String,
}

impl AppPath {
    /// Parse a path such as `/games//lola-memory/?songId=42#top`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, suffix) = match raw.find(['?', '#']) {
            Some(idx) => raw.split_at(idx),
            None => (raw, ""),
        };

        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            segments,
            suffix: suffix.to_string(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments joined without leading or trailing slash (`"games/lola-memory"`).
    pub fn joined(&self) -> String {
        self.segments.join("/")
    }

    /// Raw `?query#fragment` suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Query string without the leading `?` and without any fragment.
    pub fn query(&self) -> Option<&str> {
        let query = self.suffix.strip_prefix('?')?;
        Some(query.split('#').next().unwrap_or(query))
    }

    /// Decoded value of the first query parameter called `name`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query()?.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// The language named by the first segment, if it is a supported code.
    pub fn language_prefix(&self) -> Option<Language> {
        self.segments.first().and_then(|first| Language::from_code(first))
    }

    /// Split off a leading language segment.
    pub fn strip_language(mut self) -> (Option<Language>, AppPath) {
        match self.language_prefix() {
            Some(language) => {
                self.segments.remove(0);
                (Some(language), self)
            }
            None => (None, self),
        }
    }

    /// Same path and fragment with the query parameter `name` removed.
    pub fn without_query_param(&self, name: &str) -> AppPath {
        let fragment = self.suffix.find('#').map(|idx| &self.suffix[idx..]).unwrap_or("");
        let remaining: Vec<(String, String)> = match self.query() {
            Some(query) => url::form_urlencoded::parse(query.as_bytes())
                .filter(|(key, _)| key != name)
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
            None => Vec::new(),
        };

        let mut suffix = String::new();
        if !remaining.is_empty() {
            suffix.push('?');
            suffix.push_str(
                &url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(remaining)
                    .finish(),
            );
        }
        suffix.push_str(fragment);

        AppPath {
            segments: self.segments.clone(),
            suffix,
        }
    }

    /// `/seg1/seg2` (or `/` for the root), without the suffix.
    pub fn pathname(&self) -> String {
        format!("/{}", self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_slashes() {
        let path = AppPath::parse("games//lola-memory/");
        assert_eq!(path.segments(), ["games", "lola-memory"]);
        assert_eq!(path.joined(), "games/lola-memory");
        assert_eq!(path.pathname(), "/games/lola-memory");
    }

    #[test]
    fn test_parse_keeps_suffix_verbatim() {
        let path = AppPath::parse("/games/lola-memory?songId=42#top");
        assert_eq!(path.joined(), "games/lola-memory");
        assert_eq!(path.suffix(), "?songId=42#top");
        assert_eq!(path.query(), Some("songId=42"));
    }

    #[test]
    fn test_parse_fragment_only() {
        let path = AppPath::parse("/about#team");
        assert_eq!(path.suffix(), "#team");
        assert_eq!(path.query(), None);
    }

    #[test]
    fn test_root() {
        assert!(AppPath::parse("/").is_root());
        assert!(AppPath::parse("").is_root());
        assert_eq!(AppPath::parse("/?x=1").pathname(), "/");
    }

    #[test]
    fn test_query_param_is_decoded() {
        let path = AppPath::parse("/fr/jeux?lang=en&q=hello%20world");
        assert_eq!(path.query_param("lang").as_deref(), Some("en"));
        assert_eq!(path.query_param("q").as_deref(), Some("hello world"));
        assert_eq!(path.query_param("missing"), None);
    }

    #[test]
    fn test_strip_language() {
        let (language, rest) = AppPath::parse("/en/games/lola-memory").strip_language();
        assert_eq!(language, Some(Language::En));
        assert_eq!(rest.joined(), "games/lola-memory");

        let (language, rest) = AppPath::parse("/blog/entry").strip_language();
        assert_eq!(language, None);
        assert_eq!(rest.joined(), "blog/entry");
    }

    #[test]
    fn test_without_query_param() {
        let path = AppPath::parse("/fr/jeux?lang=en&songId=42#play");
        assert_eq!(path.without_query_param("lang").suffix(), "?songId=42#play");

        let path = AppPath::parse("/fr/jeux?lang=en");
        assert_eq!(path.without_query_param("lang").suffix(), "");
    }
}
