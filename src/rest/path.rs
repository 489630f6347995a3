//! Href building for API resources.
//!
//! DigitalOcean resources live at `/v2/<plural>` (collections) and
//! `/v2/<plural>/<id>` (instances). Pagination links returned by the server
//! are absolute URLs and are used verbatim.
//!
//! # Example
//!
//! ```rust
//! use digitalocean_sdk::rest::{build_href, cache_key, QueryParams};
//!
//! assert_eq!(build_href("droplets", None), "/v2/droplets");
//! assert_eq!(build_href("droplets", Some("42")), "/v2/droplets/42");
//!
//! let mut query = QueryParams::new();
//! query.insert("tag_name".to_string(), "web".to_string());
//! assert_eq!(cache_key("/v2/droplets", &query), "/v2/droplets?tag_name=web");
//! ```

use std::collections::BTreeMap;

/// API version prefix for every relative href.
pub const API_PREFIX: &str = "/v2";

/// Query parameters attached to a fetch.
///
/// Ordered so that identical parameter sets always render identically.
pub type QueryParams = BTreeMap<String, String>;

/// Builds the href for a collection or, with an id, one of its members.
#[must_use]
pub fn build_href(plural: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{API_PREFIX}/{plural}/{id}"),
        None => format!("{API_PREFIX}/{plural}"),
    }
}

/// Returns `true` if the href is an absolute URL (e.g. a pagination link).
#[must_use]
pub fn is_absolute_href(href: &str) -> bool {
    href.starts_with("https://") || href.starts_with("http://")
}

/// Renders the identity of a fetch: the href plus its sorted, percent-encoded
/// query string.
#[must_use]
pub fn cache_key(href: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        return href.to_string();
    }

    let rendered: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{href}{separator}{}", rendered.join("&"))
}
