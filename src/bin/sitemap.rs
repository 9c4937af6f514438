//! Sitemap binary - writes sitemap.xml and robots.txt for a static build
//!
//! Usage:
//!   cargo run --bin sitemap
//!
//! Optional environment variables:
//! - SITE_BASE_URL (defaults to http://localhost:8080)
//! - CONTENT_FILE (JSON array of content entities; static routes only when unset)
//! - SITEMAP_OUTPUT (defaults to public/sitemap.xml; robots.txt is written next to it)

use anyhow::{Context, Result};
use localized_site::config::Config;
use localized_site::content::{ContentSource, JsonContentSource};
use localized_site::routing::RouteTable;
use localized_site::sitemap;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_site=info".parse()?)
                .add_directive("sitemap=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let table = RouteTable::site().context("Invalid route table")?;

    let entities = match &config.content_file {
        Some(path) => JsonContentSource::new(path).entities()?,
        None => Vec::new(),
    };

    let output = Path::new(&config.sitemap_output);
    let xml = sitemap::generate(&table, &config.base_url, &entities);
    sitemap::write_sitemap(output, &xml)?;

    let robots_path = output.with_file_name("robots.txt");
    std::fs::write(&robots_path, sitemap::robots_txt(&config.base_url))
        .with_context(|| format!("Failed to write {}", robots_path.display()))?;
    info!("Wrote {}", robots_path.display());

    Ok(())
}
