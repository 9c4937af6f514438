//! Content entities as seen by the router and the sitemap.
//!
//! Songs, games, characters, articles and activities live in the hosted
//! backend. The router only needs their per-language names and slugs and
//! their last update time; [`ContentSource`] is that narrow interface.

use crate::i18n::{Language, Localized};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Song,
    Game,
    Character,
    Article,
    Activity,
}

impl ContentKind {
    /// Canonical route key of the section listing this kind of content.
    pub fn section_key(&self) -> &'static str {
        match self {
            ContentKind::Song => "songs",
            ContentKind::Game => "games",
            ContentKind::Character => "characters",
            ContentKind::Article => "blog",
            ContentKind::Activity => "activities",
        }
    }
}

/// One content item with parallel per-language fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub id: String,
    pub kind: ContentKind,
    #[serde(default)]
    pub name: Localized<String>,
    /// Per-language slug; a missing slug means the item is not published in that language.
    #[serde(default)]
    pub slug: Localized<Option<String>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentEntity {
    /// Display name, falling back to French, then `""`.
    pub fn name(&self, language: Language) -> &str {
        self.name.text(language)
    }

    /// Slug for `language` when the item is published in it.
    pub fn slug(&self, language: Language) -> Option<&str> {
        self.slug.present(language)
    }
}

/// Read access to the content store.
pub trait ContentSource {
    fn entities(&self) -> Result<Vec<ContentEntity>>;
}

/// Content exported to a JSON file (an array of [`ContentEntity`]).
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    path: PathBuf,
}

impl JsonContentSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for JsonContentSource {
    fn entities(&self) -> Result<Vec<ContentEntity>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read content file {}", self.path.display()))?;
        let entities: Vec<ContentEntity> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse content file {}", self.path.display()))?;

        info!("Loaded {} content entities from {}", entities.len(), self.path.display());
        Ok(entities)
    }
}

/// Fixed in-memory content, for tests and static builds.
impl ContentSource for Vec<ContentEntity> {
    fn entities(&self) -> Result<Vec<ContentEntity>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {
            "id": "song-1",
            "kind": "song",
            "name": { "fr": "La danse du requin", "en": "", "es": "El baile del tiburón" },
            "slug": { "fr": "la-danse-du-requin", "en": null, "es": "el-baile-del-tiburon" },
            "updated_at": "2024-03-05T10:00:00Z"
        },
        {
            "id": "post-1",
            "kind": "article",
            "slug": { "fr": "bien-dormir", "en": "sleep-well", "es": null }
        }
    ]"#;

    #[test]
    fn test_json_source_parses_entities() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let entities = JsonContentSource::new(file.path()).entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].kind, ContentKind::Song);
        assert!(entities[0].updated_at.is_some());
        assert_eq!(entities[1].updated_at, None);
    }

    #[test]
    fn test_json_source_missing_file_is_error() {
        let source = JsonContentSource::new("/nonexistent/content.json");
        let err = source.entities().unwrap_err();
        assert!(err.to_string().contains("Failed to read content file"));
    }

    #[test]
    fn test_name_falls_back_to_french() {
        let entities: Vec<ContentEntity> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(entities[0].name(Language::En), "La danse du requin");
        assert_eq!(entities[0].name(Language::Es), "El baile del tiburón");
        assert_eq!(entities[1].name(Language::Fr), "");
    }

    #[test]
    fn test_slug_has_no_fallback() {
        let entities: Vec<ContentEntity> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(entities[0].slug(Language::En), None);
        assert_eq!(entities[1].slug(Language::En), Some("sleep-well"));
    }

    #[test]
    fn test_section_keys_are_routes() {
        let table = crate::routing::RouteTable::site().unwrap();
        for kind in [
            ContentKind::Song,
            ContentKind::Game,
            ContentKind::Character,
            ContentKind::Article,
            ContentKind::Activity,
        ] {
            assert!(table.get(kind.section_key()).is_some());
        }
    }
}
