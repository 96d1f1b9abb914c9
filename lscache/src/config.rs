//! Cache policy configuration.
//!
//! A [`CacheConfig`] is built once per cache policy (typically at startup),
//! adjusted through its builder or setters, and then only read while
//! requests are decided. It can be shared between requests behind an `Arc`.

use std::collections::BTreeSet;

use lscache_core::{CacheType, ConfigurationError, Values};

use crate::rules::{path, query};

/// Default cache lifetime: 120 minutes, in seconds.
pub const DEFAULT_LIFETIME: u64 = 120 * 60;

/// Default name of the cookie (and query parameter) that bypasses the cache.
pub const DEFAULT_BYPASS_COOKIE: &str = "cache_bypass";

/// Methods whose responses are cacheable by default.
pub const DEFAULT_CACHEABLE_VERBS: [&str; 2] = ["GET", "HEAD"];

/// Cache policy shared by every decision made with it.
///
/// # Examples
///
/// ```
/// use lscache::{CacheConfig, CacheType};
///
/// let config = CacheConfig::builder()
///     .cache_type(CacheType::Private)
///     .lifetime(360)
///     .excluded_urls(["/admin*", "checkout*"])
///     .excluded_query_strings("preview=*")
///     .build();
///
/// assert!(config.is_excluded_url("/admin/users"));
/// assert!(config.is_excluded_query_string("preview=1"));
/// assert!(config.is_excluded_query_string("page=2&cache_bypass=1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    enabled: bool,
    lifetime: u64,
    cache_type: CacheType,
    esi: bool,
    bypass_cookie: String,
    excluded_urls: Vec<String>,
    excluded_query_strings: Vec<String>,
    ajax_cacheable: bool,
    cacheable_verbs: BTreeSet<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lifetime: DEFAULT_LIFETIME,
            cache_type: CacheType::default(),
            esi: false,
            bypass_cookie: DEFAULT_BYPASS_COOKIE.to_string(),
            excluded_urls: Vec::new(),
            excluded_query_strings: Vec::new(),
            ajax_cacheable: false,
            cacheable_verbs: normalize_verbs(DEFAULT_CACHEABLE_VERBS),
        }
    }
}

impl CacheConfig {
    /// Creates a builder starting from the defaults.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Whether caching is enabled at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables caching.
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    /// Disables caching; every decision becomes non-cacheable.
    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    /// Cache lifetime in seconds. Zero means never cache.
    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    /// Sets the cache lifetime in seconds.
    pub fn set_lifetime(&mut self, seconds: u64) -> &mut Self {
        self.lifetime = seconds;
        self
    }

    /// Cache type used when a call does not override it.
    pub fn cache_type(&self) -> CacheType {
        self.cache_type
    }

    /// Sets the cache type from its directive keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnsupportedCacheType`] for anything but
    /// `public` or `private`; the configuration is not modified.
    pub fn set_type(&mut self, cache_type: &str) -> Result<&mut Self, ConfigurationError> {
        self.cache_type = cache_type.parse()?;
        Ok(self)
    }

    /// Sets the cache type.
    pub fn set_cache_type(&mut self, cache_type: CacheType) -> &mut Self {
        self.cache_type = cache_type;
        self
    }

    /// Whether edge side includes are enabled.
    pub fn esi(&self) -> bool {
        self.esi
    }

    /// Enables or disables edge side includes.
    pub fn set_esi(&mut self, esi: bool) -> &mut Self {
        self.esi = esi;
        self
    }

    /// Name of the bypass cookie.
    pub fn bypass_cookie(&self) -> &str {
        &self.bypass_cookie
    }

    /// Sets the name of the bypass cookie.
    pub fn set_bypass_cookie(&mut self, name: impl Into<String>) -> &mut Self {
        self.bypass_cookie = name.into();
        self
    }

    /// Configured URL exclusion patterns.
    pub fn excluded_urls(&self) -> &[String] {
        &self.excluded_urls
    }

    /// Replaces the URL exclusion patterns.
    pub fn set_excluded_urls(&mut self, patterns: impl Into<Values>) -> &mut Self {
        self.excluded_urls = patterns.into().into_vec();
        self
    }

    /// Configured query string exclusion patterns.
    pub fn excluded_query_strings(&self) -> &[String] {
        &self.excluded_query_strings
    }

    /// Replaces the query string exclusion patterns.
    pub fn set_excluded_query_strings(&mut self, patterns: impl Into<Values>) -> &mut Self {
        self.excluded_query_strings = patterns.into().into_vec();
        self
    }

    /// Query string patterns actually evaluated: the configured ones followed
    /// by the pattern matching `<bypass_cookie>=1`.
    ///
    /// Computed on every call, so the bypass pattern appears exactly once.
    pub fn effective_excluded_query_strings(&self) -> Vec<String> {
        let mut patterns = self.excluded_query_strings.clone();
        patterns.push(query::bypass_pattern(&self.bypass_cookie));
        patterns
    }

    /// Whether XHR requests may be cached.
    pub fn ajax_cacheable(&self) -> bool {
        self.ajax_cacheable
    }

    /// Allows or forbids caching XHR requests.
    pub fn set_ajax_cacheable(&mut self, cacheable: bool) -> &mut Self {
        self.ajax_cacheable = cacheable;
        self
    }

    /// Cacheable request methods, upper-cased.
    pub fn cacheable_verbs(&self) -> &BTreeSet<String> {
        &self.cacheable_verbs
    }

    /// Replaces the cacheable request methods. Matching is case-insensitive.
    pub fn set_cacheable_verbs(&mut self, verbs: impl Into<Values>) -> &mut Self {
        self.cacheable_verbs = normalize_verbs(verbs.into().into_vec());
        self
    }

    /// Whether `path` matches one of the URL exclusion patterns.
    pub fn is_excluded_url(&self, path: &str) -> bool {
        path::first_match(&self.excluded_urls, path).is_some()
    }

    /// Whether `query` matches one of the effective query string exclusions.
    pub fn is_excluded_query_string(&self, query: &str) -> bool {
        query::first_match(&self.excluded_query_strings, &self.bypass_cookie, query).is_some()
    }
}

/// Builder for [`CacheConfig`].
#[derive(Debug, Clone, Default)]
pub struct CacheConfigBuilder {
    inner: CacheConfig,
}

impl CacheConfigBuilder {
    /// Enables or disables caching.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.inner.enabled = enabled;
        self
    }

    /// Sets the cache lifetime in seconds.
    pub fn lifetime(mut self, seconds: u64) -> Self {
        self.inner.lifetime = seconds;
        self
    }

    /// Sets the default cache type.
    pub fn cache_type(mut self, cache_type: CacheType) -> Self {
        self.inner.cache_type = cache_type;
        self
    }

    /// Enables or disables edge side includes.
    pub fn esi(mut self, esi: bool) -> Self {
        self.inner.esi = esi;
        self
    }

    /// Sets the bypass cookie name.
    pub fn bypass_cookie(mut self, name: impl Into<String>) -> Self {
        self.inner.bypass_cookie = name.into();
        self
    }

    /// Sets the URL exclusion patterns.
    pub fn excluded_urls(mut self, patterns: impl Into<Values>) -> Self {
        self.inner.set_excluded_urls(patterns);
        self
    }

    /// Sets the query string exclusion patterns.
    pub fn excluded_query_strings(mut self, patterns: impl Into<Values>) -> Self {
        self.inner.set_excluded_query_strings(patterns);
        self
    }

    /// Allows or forbids caching XHR requests.
    pub fn ajax_cacheable(mut self, cacheable: bool) -> Self {
        self.inner.ajax_cacheable = cacheable;
        self
    }

    /// Sets the cacheable request methods.
    pub fn cacheable_verbs(mut self, verbs: impl Into<Values>) -> Self {
        self.inner.set_cacheable_verbs(verbs);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> CacheConfig {
        self.inner
    }
}

fn normalize_verbs<I, S>(verbs: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    verbs
        .into_iter()
        .map(|verb| verb.as_ref().to_ascii_uppercase())
        .collect()
}
