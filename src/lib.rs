pub mod config;
pub mod content;
pub mod i18n;
pub mod routing;
pub mod seo;
pub mod server;
pub mod sitemap;
