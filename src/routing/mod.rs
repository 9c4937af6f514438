//! Localized routing.
//!
//! - `table`: canonical route keys and their per-language slugs
//! - `path`: normalized path model shared by every component below
//! - `links`: the single link-rewriting function and the link renderer
//! - `canonical`: canonical URL, hreflang alternates and page metadata

mod canonical;
mod links;
mod path;
mod table;

pub use canonical::{
    resolve_current_canonical_key, resolve_current_route, Alternate, CanonicalMetadataBuilder,
    CurrentRoute, X_DEFAULT,
};
pub use links::{is_external, localize_entry_path, localize_href, LinkRenderer, NavLink};
pub use path::AppPath;
pub use table::{site_routes, RouteCategory, RouteEntry, RouteTable, RouteTableError};
