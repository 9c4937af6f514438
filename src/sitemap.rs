//! Sitemap generation.
//!
//! One `<url>` per (route or content item, language) with a slug in that
//! language. Locations use the clean slug without the language prefix.

use crate::content::{ContentEntity, ContentKind};
use crate::i18n::Language;
use crate::routing::{RouteCategory, RouteTable};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

// (changefreq, priority) per category
const HOME: (ChangeFreq, f32) = (ChangeFreq::Daily, 1.0);
const SECTION: (ChangeFreq, f32) = (ChangeFreq::Weekly, 0.8);
const DETAIL: (ChangeFreq, f32) = (ChangeFreq::Monthly, 0.7);
const INFO: (ChangeFreq, f32) = (ChangeFreq::Monthly, 0.5);
const LEGAL: (ChangeFreq, f32) = (ChangeFreq::Yearly, 0.3);
const ARTICLE: (ChangeFreq, f32) = (ChangeFreq::Weekly, 0.6);
const CONTENT: (ChangeFreq, f32) = (ChangeFreq::Monthly, 0.6);

fn route_policy(category: RouteCategory) -> (ChangeFreq, f32) {
    match category {
        RouteCategory::Section => SECTION,
        RouteCategory::Detail => DETAIL,
        RouteCategory::Info => INFO,
        RouteCategory::Legal => LEGAL,
    }
}

fn content_policy(kind: ContentKind) -> (ChangeFreq, f32) {
    match kind {
        ContentKind::Article => ARTICLE,
        _ => CONTENT,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Collects sitemap entries, dropping repeated locations.
pub struct SitemapBuilder<'a> {
    table: &'a RouteTable,
    base_url: &'a str,
    entries: Vec<SitemapEntry>,
    seen: HashSet<String>,
}

impl<'a> SitemapBuilder<'a> {
    pub fn new(table: &'a RouteTable, base_url: &'a str) -> Self {
        Self {
            table,
            base_url: base_url.trim_end_matches('/'),
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Home page plus every static route in every language.
    pub fn add_static_routes(&mut self) -> &mut Self {
        self.push(format!("{}/", self.base_url), None, HOME);

        let table = self.table;
        for entry in table.entries() {
            for language in Language::ALL {
                let loc = format!("{}/{}", self.base_url, entry.slug(language));
                self.push(loc, None, route_policy(entry.category));
            }
        }
        self
    }

    /// Every content item in every language it has a slug for.
    pub fn add_content(&mut self, entities: &[ContentEntity]) -> &mut Self {
        let table = self.table;
        for entity in entities {
            let section_key = entity.kind.section_key();
            let lastmod = entity.updated_at.map(|updated| updated.date_naive());

            for language in Language::ALL {
                let Some(slug) = entity.slug(language) else {
                    continue;
                };
                let section = table.localize(section_key, language).unwrap_or(section_key);
                let loc = format!("{}/{}/{}", self.base_url, section, slug.trim_matches('/'));
                self.push(loc, lastmod, content_policy(entity.kind));
            }
        }
        self
    }

    pub fn build(&mut self) -> Vec<SitemapEntry> {
        self.seen.clear();
        std::mem::take(&mut self.entries)
    }

    fn push(&mut self, loc: String, lastmod: Option<NaiveDate>, policy: (ChangeFreq, f32)) {
        if !self.seen.insert(loc.clone()) {
            return;
        }
        let (changefreq, priority) = policy;
        self.entries.push(SitemapEntry {
            loc,
            lastmod,
            changefreq,
            priority,
        });
    }
}

/// Render entries as a sitemap XML document.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq.as_str()));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the full sitemap XML for the static routes and `entities`.
pub fn generate(table: &RouteTable, base_url: &str, entities: &[ContentEntity]) -> String {
    let entries = SitemapBuilder::new(table, base_url)
        .add_static_routes()
        .add_content(entities)
        .build();
    render_xml(&entries)
}

/// Write the sitemap to `path`, creating parent directories.
pub fn write_sitemap(path: &Path, xml: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, xml).with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    info!("Wrote sitemap ({} bytes) to {}", xml.len(), path.display());
    Ok(())
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Localized;
    use chrono::{TimeZone, Utc};

    const BASE: &str = "https://kids.example";

    fn table() -> RouteTable {
        RouteTable::site().unwrap()
    }

    fn article() -> ContentEntity {
        ContentEntity {
            id: "post-1".to_string(),
            kind: ContentKind::Article,
            name: Localized::default(),
            slug: Localized::new(Some("bien-dormir".to_string()), Some("sleep-well".to_string()), None),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap()),
        }
    }

    // ==================== Static Route Tests ====================

    #[test]
    fn test_static_routes_use_unprefixed_slugs() {
        let table = table();
        let entries = SitemapBuilder::new(&table, BASE).add_static_routes().build();
        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();

        assert_eq!(locs[0], "https://kids.example/");
        assert!(locs.contains(&"https://kids.example/jeux/lola-memory"));
        assert!(locs.contains(&"https://kids.example/juegos/ritmo-tiburon"));
        assert!(!locs.iter().any(|loc| loc.contains("/fr/")));
    }

    #[test]
    fn test_identical_slugs_are_emitted_once() {
        let table = table();
        let entries = SitemapBuilder::new(&table, BASE).add_static_routes().build();
        let blog = entries
            .iter()
            .filter(|e| e.loc == "https://kids.example/blog")
            .count();
        assert_eq!(blog, 1);
    }

    #[test]
    fn test_policies_per_category() {
        let table = table();
        let entries = SitemapBuilder::new(&table, BASE).add_static_routes().build();
        let find = |loc: &str| entries.iter().find(|e| e.loc == loc).unwrap().clone();

        assert_eq!(find("https://kids.example/").changefreq, ChangeFreq::Daily);
        assert_eq!(find("https://kids.example/chansons").priority, 0.8);
        assert_eq!(find("https://kids.example/privacy").changefreq, ChangeFreq::Yearly);
    }

    // ==================== Content Tests ====================

    #[test]
    fn test_content_one_entry_per_present_slug() {
        let table = table();
        let entries = SitemapBuilder::new(&table, BASE).add_content(&[article()]).build();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].loc, "https://kids.example/blog/bien-dormir");
        assert_eq!(entries[1].loc, "https://kids.example/blog/sleep-well");
        assert_eq!(entries[0].lastmod, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(entries[0].changefreq, ChangeFreq::Weekly);
    }

    #[test]
    fn test_content_section_is_localized() {
        let table = table();
        let song = ContentEntity {
            id: "song-1".to_string(),
            kind: ContentKind::Song,
            name: Localized::default(),
            slug: Localized::new(None, None, Some("el-baile".to_string())),
            updated_at: None,
        };
        let entries = SitemapBuilder::new(&table, BASE).add_content(&[song]).build();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://kids.example/canciones/el-baile");
        assert_eq!(entries[0].lastmod, None);
    }

    // ==================== Rendering Tests ====================

    #[test]
    fn test_render_xml() {
        let xml = generate(&table(), BASE, &[article()]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://kids.example/blog/sleep-well</loc>"));
        assert!(xml.contains("<lastmod>2024-03-05</lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_render_xml_escapes_loc() {
        let entries = vec![SitemapEntry {
            loc: "https://kids.example/a?b=1&c=2".to_string(),
            lastmod: None,
            changefreq: ChangeFreq::Monthly,
            priority: 0.5,
        }];
        assert!(render_xml(&entries).contains("a?b=1&amp;c=2"));
    }

    #[test]
    fn test_write_sitemap_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/sitemap.xml");
        write_sitemap(&path, "<urlset/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<urlset/>");
    }

    #[test]
    fn test_robots_txt() {
        assert_eq!(
            robots_txt("https://kids.example/"),
            "User-agent: *\nAllow: /\n\nSitemap: https://kids.example/sitemap.xml\n"
        );
    }
}
