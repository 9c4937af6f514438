use crate::i18n::QueryOverride;
use crate::seo::SiteInfo;
use anyhow::{bail, Context, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_name: String,
    pub base_url: String,
    pub default_image: Option<String>,

    // Server
    pub port: u16,

    // Language resolution
    pub lang_cookie_name: String,
    pub lang_query_param: String,
    pub lang_query_persists: bool,

    // Sitemap
    pub content_file: Option<String>,
    pub sitemap_output: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SITE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Self {
            // Site
            site_name: std::env::var("SITE_NAME").unwrap_or_else(|_| "Lola & Friends".to_string()),
            base_url: normalize_base_url(&base_url)?,
            default_image: std::env::var("SITE_DEFAULT_IMAGE").ok().filter(|v| !v.is_empty()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Language resolution
            lang_cookie_name: std::env::var("LANG_COOKIE_NAME")
                .unwrap_or_else(|_| "lang".to_string()),
            lang_query_param: std::env::var("LANG_QUERY_PARAM")
                .unwrap_or_else(|_| "lang".to_string()),
            lang_query_persists: std::env::var("LANG_QUERY_PERSISTS")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),

            // Sitemap
            content_file: std::env::var("CONTENT_FILE").ok().filter(|v| !v.is_empty()),
            sitemap_output: std::env::var("SITEMAP_OUTPUT")
                .unwrap_or_else(|_| "public/sitemap.xml".to_string()),
        })
    }

    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            name: self.site_name.clone(),
            base_url: self.base_url.clone(),
            default_image: self.default_image.clone(),
        }
    }

    pub fn query_override(&self) -> QueryOverride {
        if self.lang_query_persists {
            QueryOverride::Persist
        } else {
            QueryOverride::Transient
        }
    }
}

/// Validate an absolute http(s) base URL and strip its trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).with_context(|| format!("Invalid SITE_BASE_URL: {}", trimmed))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("SITE_BASE_URL must use http or https, got '{}'", url.scheme());
    }
    if url.host_str().is_none() {
        bail!("SITE_BASE_URL has no host: {}", trimmed);
    }
    if url.query().is_some() || url.fragment().is_some() {
        bail!("SITE_BASE_URL must not carry a query or fragment: {}", trimmed);
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
