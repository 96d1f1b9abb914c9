//! LiteSpeed directive headers and their value grammar.
//!
//! | Header | Value |
//! |--------|-------|
//! | [`CONTROL_HEADER`] | `<public\|private>[, esi=on], max-age=<seconds>` |
//! | [`VARY_HEADER`] | comma separated vary values, e.g. `cookie=<name>` |
//! | [`TAG_HEADER`] | comma separated tags |
//! | [`PURGE_HEADER`] | `*`, `/<uri> `, `tag=<t>, tag=<t>` or uri followed by tags |
//!
//! Everything here is deterministic string building: the functions never
//! look at the request, the rule chain decides whether they are called.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Instructs the proxy whether and how long to cache the response.
pub const CONTROL_HEADER: &str = "X-LiteSpeed-Cache-Control";

/// Sets the cache vary of the current response only.
pub const VARY_HEADER: &str = "X-LiteSpeed-Vary";

/// Purges cached objects by URI or by tag.
pub const PURGE_HEADER: &str = "X-LiteSpeed-Purge";

/// Assigns tags to the cached object.
pub const TAG_HEADER: &str = "X-LiteSpeed-Tag";

/// Purge value that invalidates every cached object of the site.
pub const PURGE_ALL: &str = "*";

/// Separator between list items in vary, tag and purge values.
const SEPARATOR: &str = ", ";

/// Who may store the cached response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheType {
    /// Shared between all visitors.
    #[default]
    Public,
    /// Cached per visitor session.
    Private,
}

impl CacheType {
    /// Directive keyword of this cache type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheType::Public => "public",
            CacheType::Private => "private",
        }
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheType {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "public" => Ok(CacheType::Public),
            "private" => Ok(CacheType::Private),
            other => Err(ConfigurationError::UnsupportedCacheType(other.to_string())),
        }
    }
}

/// One value or a list of values.
///
/// Operations that accept tags, vary values or exclusion patterns take
/// anything convertible into `Values`, so a single string and a list can be
/// passed interchangeably. In configuration files the same holds: a scalar
/// deserializes as a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    /// A single value.
    One(String),
    /// Several values, in order.
    Many(Vec<String>),
}

impl Values {
    /// Converts into an ordered list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Values::One(value) => vec![value],
            Values::Many(values) => values,
        }
    }
}

impl Default for Values {
    fn default() -> Self {
        Values::Many(Vec::new())
    }
}

impl From<&str> for Values {
    fn from(value: &str) -> Self {
        Values::One(value.to_owned())
    }
}

impl From<String> for Values {
    fn from(value: String) -> Self {
        Values::One(value)
    }
}

impl From<Vec<String>> for Values {
    fn from(values: Vec<String>) -> Self {
        Values::Many(values)
    }
}

impl From<Vec<&str>> for Values {
    fn from(values: Vec<&str>) -> Self {
        Values::Many(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Values {
    fn from(values: &[&str]) -> Self {
        Values::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl From<&[String]> for Values {
    fn from(values: &[String]) -> Self {
        Values::Many(values.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Values {
    fn from(values: [&str; N]) -> Self {
        Values::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

/// Tags, vary values and purge target accumulated for one response.
///
/// Both lists are append-only: order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    tags: Vec<String>,
    vary: Vec<String>,
    uri: Option<String>,
}

impl DirectiveSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one or more tags.
    pub fn add_tags(&mut self, tags: impl Into<Values>) -> &mut Self {
        self.tags.extend(tags.into().into_vec());
        self
    }

    /// Appends one or more vary values.
    pub fn add_vary(&mut self, vary: impl Into<Values>) -> &mut Self {
        self.vary.extend(vary.into().into_vec());
        self
    }

    /// Sets the URI targeted by a purge, replacing any previous one.
    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.uri = Some(uri.into());
        self
    }

    /// Accumulated tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Accumulated vary values.
    pub fn vary(&self) -> &[String] {
        &self.vary
    }

    /// URI targeted by a purge.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

/// A single directive header, with the exact name expected by the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name, one of the `*_HEADER` constants.
    pub name: &'static str,
    /// Encoded header value.
    pub value: String,
}

impl Header {
    /// Creates a header.
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Header changes the host must apply to the current response.
///
/// When [`clears_caching_headers`](Self::clears_caching_headers) is set the
/// host removes any control, vary and tag header written earlier before
/// writing [`headers`](Self::headers): a response cannot be cached and purge
/// at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDirectives {
    clear_caching: bool,
    headers: Vec<Header>,
}

impl ResponseDirectives {
    /// No header changes at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Headers to write without clearing anything.
    pub fn set(headers: Vec<Header>) -> Self {
        Self {
            clear_caching: false,
            headers,
        }
    }

    /// Clears the caching headers, then writes `header`.
    pub fn replace_caching(header: Header) -> Self {
        Self {
            clear_caching: true,
            headers: vec![header],
        }
    }

    /// Whether previously written control, vary and tag headers must go.
    pub fn clears_caching_headers(&self) -> bool {
        self.clear_caching
    }

    /// Headers to write, in order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Value of the named header, if it is written.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }

    /// Whether the host has nothing to do.
    pub fn is_empty(&self) -> bool {
        !self.clear_caching && self.headers.is_empty()
    }
}

/// Encodes the cache control value.
///
/// ```
/// use lscache_core::{CacheType, directive::cache_control};
///
/// assert_eq!(cache_control(CacheType::Private, false, 360), "private, max-age=360");
/// assert_eq!(cache_control(CacheType::Public, true, 60), "public, esi=on, max-age=60");
/// ```
pub fn cache_control(cache_type: CacheType, esi: bool, max_age: u64) -> String {
    if esi {
        format!("{cache_type}, esi=on, max-age={max_age}")
    } else {
        format!("{cache_type}, max-age={max_age}")
    }
}

/// Joins vary values or tags, or `None` when there is nothing to send.
pub fn join_list(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(SEPARATOR))
}

/// Vary value that splits the cache on a cookie.
pub fn cookie_vary(cookie_name: &str) -> String {
    format!("cookie={cookie_name}")
}

/// Encodes tags as a purge list: `tag=a, tag=b`.
pub fn purge_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("tag={tag}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Encodes a combined purge value for a URI and tags.
///
/// A non-empty URI is written with exactly one leading slash and followed by
/// a space, then the tags follow as `tag=` items. An empty result means
/// there is nothing to purge.
///
/// ```
/// use lscache_core::directive::purge_target;
///
/// assert_eq!(purge_target(Some("/about-us"), &[]), "/about-us ");
/// assert_eq!(purge_target(Some("about-us"), &["pages".to_string()]), "/about-us tag=pages");
/// assert_eq!(purge_target(None, &[]), "");
/// ```
pub fn purge_target(uri: Option<&str>, tags: &[String]) -> String {
    let mut value = String::new();
    if let Some(uri) = uri.filter(|uri| !uri.is_empty()) {
        value.push('/');
        value.push_str(uri.trim_start_matches('/'));
        value.push(' ');
    }
    value.push_str(&purge_tags(tags));
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_cache_type_from_str() {
        assert_eq!("public".parse::<CacheType>(), Ok(CacheType::Public));
        assert_eq!("private".parse::<CacheType>(), Ok(CacheType::Private));
        assert_eq!(
            "foo".parse::<CacheType>(),
            Err(ConfigurationError::UnsupportedCacheType("foo".to_string()))
        );
    }

    #[test]
    fn test_cache_control_segments() {
        assert_eq!(cache_control(CacheType::Private, false, 360), "private, max-age=360");
        assert_eq!(cache_control(CacheType::Private, true, 360), "private, esi=on, max-age=360");
        assert_eq!(cache_control(CacheType::Public, false, 0), "public, max-age=0");
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&[]), None);
        assert_eq!(join_list(&strings(&["a"])), Some("a".to_string()));
        assert_eq!(join_list(&strings(&["a", "b", "a"])), Some("a, b, a".to_string()));
    }

    #[test]
    fn test_purge_tags() {
        assert_eq!(purge_tags(&strings(&["articles", "pages"])), "tag=articles, tag=pages");
        assert_eq!(purge_tags(&[]), "");
    }

    #[test]
    fn test_purge_target_normalizes_leading_slashes() {
        assert_eq!(purge_target(Some("about-us"), &[]), "/about-us ");
        assert_eq!(purge_target(Some("//about-us"), &[]), "/about-us ");
        assert_eq!(purge_target(Some(""), &strings(&["a"])), "tag=a");
    }

    #[test]
    fn test_purge_target_uri_and_tags() {
        assert_eq!(
            purge_target(Some("/blog"), &strings(&["articles", "pages"])),
            "/blog tag=articles, tag=pages"
        );
    }

    #[test]
    fn test_directive_set_accumulates() {
        let mut set = DirectiveSet::new();
        set.add_tags(["a", "b"]).add_tags("c").add_tags("a");
        set.add_vary("value=default").add_vary(vec!["x", "y"]);
        assert_eq!(set.tags(), strings(&["a", "b", "c", "a"]));
        assert_eq!(set.vary(), strings(&["value=default", "x", "y"]));
        assert_eq!(set.uri(), None);
        set.set_uri("/one").set_uri("/two");
        assert_eq!(set.uri(), Some("/two"));
    }

    #[test]
    fn test_response_directives_lookup() {
        let directives = ResponseDirectives::replace_caching(Header::new(PURGE_HEADER, PURGE_ALL));
        assert!(directives.clears_caching_headers());
        assert_eq!(directives.get("x-litespeed-purge"), Some("*"));
        assert_eq!(directives.get(CONTROL_HEADER), None);
        assert!(ResponseDirectives::none().is_empty());
    }

    #[test]
    fn test_header_display() {
        let header = Header::new(VARY_HEADER, cookie_vary("mycookie"));
        assert_eq!(header.to_string(), "X-LiteSpeed-Vary: cookie=mycookie");
    }
}
