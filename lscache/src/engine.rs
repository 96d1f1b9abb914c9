//! Per-request cache handle.

use lscache_core::directive::{
    self, CONTROL_HEADER, PURGE_ALL, PURGE_HEADER, TAG_HEADER, VARY_HEADER,
};
use lscache_core::{
    CacheType, DirectiveSet, Header, Predicate, RequestContext, RequestTarget, ResponseDirectives,
    Values,
};

use crate::config::CacheConfig;
use crate::decision::Decision;
use crate::rules::{self, Candidate};

/// Per-call overrides for [`Cache::cache_with`].
///
/// Every field falls back to the configuration (or, for `url`, to the
/// request URL) when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Cache type for this response only.
    pub cache_type: Option<CacheType>,
    /// Lifetime in seconds for this response only. Zero means absent.
    pub lifetime: Option<u64>,
    /// URL to decide for instead of the request URL. Empty means absent.
    pub url: Option<String>,
}

impl CacheOptions {
    /// Overrides the cache type.
    pub fn cache_type(mut self, cache_type: CacheType) -> Self {
        self.cache_type = Some(cache_type);
        self
    }

    /// Overrides the lifetime.
    pub fn lifetime(mut self, seconds: u64) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Decides for `url` instead of the request URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    fn target(&self) -> Option<RequestTarget> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(RequestTarget::parse)
    }
}

/// Decides whether `request` may be cached under `config`.
pub fn should_cache(config: &CacheConfig, request: &RequestContext) -> bool {
    Cache::new(config, request).should_cache()
}

/// Cache directives for one request.
///
/// A `Cache` pairs the shared configuration with the current request and
/// accumulates the tags, vary values and purge URI of the response. Its
/// operations return [`ResponseDirectives`] for the host to apply; nothing
/// is written anywhere by the handle itself.
///
/// # Examples
///
/// ```
/// use lscache::{Cache, CacheConfig, CacheType, RequestContext};
///
/// let config = CacheConfig::builder()
///     .cache_type(CacheType::Private)
///     .lifetime(360)
///     .build();
/// let request = RequestContext::builder()
///     .method("GET")
///     .url("/blog")
///     .interactive(true)
///     .build();
///
/// let mut cache = Cache::new(&config, &request);
/// cache.add_tags(["articles", "pages"]);
///
/// let directives = cache.cache();
/// assert_eq!(directives.get("X-LiteSpeed-Cache-Control"), Some("private, max-age=360"));
/// assert_eq!(directives.get("X-LiteSpeed-Tag"), Some("articles, pages"));
/// ```
#[derive(Debug, Clone)]
pub struct Cache<'a> {
    config: &'a CacheConfig,
    request: &'a RequestContext,
    directives: DirectiveSet,
}

impl<'a> Cache<'a> {
    /// Creates a handle with nothing accumulated.
    pub fn new(config: &'a CacheConfig, request: &'a RequestContext) -> Self {
        Self::with_directives(config, request, DirectiveSet::new())
    }

    /// Creates a handle starting from already accumulated directives.
    pub fn with_directives(
        config: &'a CacheConfig,
        request: &'a RequestContext,
        directives: DirectiveSet,
    ) -> Self {
        Self {
            config,
            request,
            directives,
        }
    }

    /// Configuration the handle decides with.
    pub fn config(&self) -> &'a CacheConfig {
        self.config
    }

    /// Request being decided.
    pub fn request(&self) -> &'a RequestContext {
        self.request
    }

    /// Tags, vary values and purge URI accumulated so far.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// Appends tags for the cached object.
    pub fn add_tags(&mut self, tags: impl Into<Values>) -> &mut Self {
        self.directives.add_tags(tags);
        self
    }

    /// Appends a single tag.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.directives.add_tags(Values::One(tag.into()));
        self
    }

    /// Appends vary values for the cached object.
    pub fn add_vary(&mut self, vary: impl Into<Values>) -> &mut Self {
        self.directives.add_vary(vary);
        self
    }

    /// Sets the URI purged by [`purge`](Self::purge).
    pub fn add_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.directives.set_uri(uri);
        self
    }

    /// Accumulated tags, in order.
    pub fn tags(&self) -> &[String] {
        self.directives.tags()
    }

    /// Accumulated vary values, in order.
    pub fn vary(&self) -> &[String] {
        self.directives.vary()
    }

    /// URI set by [`add_uri`](Self::add_uri).
    pub fn uri(&self) -> Option<&str> {
        self.directives.uri()
    }

    /// Runs the rule chain for the request URL.
    pub fn decide(&self) -> Decision {
        self.decide_for(self.request.target())
    }

    /// Runs the rule chain for `target` instead of the request URL.
    pub fn decide_for(&self, target: &RequestTarget) -> Decision {
        let result = rules::chain(self.config).check(Candidate::new(self.request, target));
        let decision = Candidate::into_decision(result);
        tracing::debug!(
            path = target.path(),
            query = target.query(),
            exclusion = ?decision.exclusion(),
            "cache decision"
        );
        decision
    }

    /// Whether the request URL may be cached.
    pub fn should_cache(&self) -> bool {
        self.decide().is_cacheable()
    }

    /// Cache directives with the configured type and lifetime, or nothing
    /// when a rule excludes the request.
    pub fn cache(&self) -> ResponseDirectives {
        self.cache_with(&CacheOptions::default())
    }

    /// Like [`cache`](Self::cache), with per-call overrides.
    pub fn cache_with(&self, options: &CacheOptions) -> ResponseDirectives {
        let decision = match options.target() {
            Some(target) => self.decide_for(&target),
            None => self.decide(),
        };
        if !decision.is_cacheable() {
            return ResponseDirectives::none();
        }

        let cache_type = options.cache_type.unwrap_or(self.config.cache_type());
        ResponseDirectives::set(self.cache_directives(cache_type, options.lifetime))
    }

    /// Control header followed by the vary and tag headers when there is
    /// something to send. Does not consult the rules.
    pub fn cache_directives(&self, cache_type: CacheType, lifetime: Option<u64>) -> Vec<Header> {
        let mut headers = vec![self.cache_control_header(cache_type, lifetime)];
        if let Some(vary) = directive::join_list(self.directives.vary()) {
            headers.push(Header::new(VARY_HEADER, vary));
        }
        if let Some(tags) = directive::join_list(self.directives.tags()) {
            headers.push(Header::new(TAG_HEADER, tags));
        }
        headers
    }

    /// Control header for `cache_type`. A missing or zero `lifetime` uses
    /// the configured one.
    pub fn cache_control_header(&self, cache_type: CacheType, lifetime: Option<u64>) -> Header {
        let max_age = lifetime
            .filter(|seconds| *seconds > 0)
            .unwrap_or(self.config.lifetime());
        Header::new(
            CONTROL_HEADER,
            directive::cache_control(cache_type, self.config.esi(), max_age),
        )
    }

    /// Vary header splitting the cache on the cookie called `name`.
    pub fn cookie_vary_header(name: &str) -> Header {
        Header::new(VARY_HEADER, directive::cookie_vary(name))
    }

    /// Purges every cached object.
    pub fn purge_all(&self) -> ResponseDirectives {
        self.emit_purge(PURGE_ALL.to_string())
    }

    /// Purges the accumulated URI and tags.
    pub fn purge(&self) -> ResponseDirectives {
        self.emit_purge(directive::purge_target(
            self.directives.uri(),
            self.directives.tags(),
        ))
    }

    /// Purges the given tags, ignoring the accumulated ones.
    pub fn purge_tags(&self, tags: impl Into<Values>) -> ResponseDirectives {
        self.emit_purge(directive::purge_tags(&tags.into().into_vec()))
    }

    fn emit_purge(&self, value: String) -> ResponseDirectives {
        if !self.request.allows_directives() {
            tracing::debug!("purge skipped outside an interactive request");
            return ResponseDirectives::none();
        }
        if value.is_empty() {
            tracing::debug!("purge skipped, nothing to purge");
            return ResponseDirectives::none();
        }

        tracing::debug!(purge = %value, "purging cache");
        ResponseDirectives::replace_caching(Header::new(PURGE_HEADER, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Exclusion;
    use pretty_assertions::assert_eq;

    fn live(url: &str) -> RequestContext {
        RequestContext::builder()
            .method("GET")
            .url(url)
            .interactive(true)
            .build()
    }

    #[test]
    fn test_zero_lifetime_override_uses_configured() {
        let config = CacheConfig::builder().lifetime(60).build();
        let request = live("/");
        let cache = Cache::new(&config, &request);
        let header = cache.cache_control_header(CacheType::Public, Some(0));
        assert_eq!(header.value, "public, max-age=60");
        let header = cache.cache_control_header(CacheType::Public, Some(5));
        assert_eq!(header.value, "public, max-age=5");
    }

    #[test]
    fn test_url_override_replaces_request_target() {
        let config = CacheConfig::builder().excluded_urls("/admin*").build();
        let request = live("/admin/users");
        let cache = Cache::new(&config, &request);
        assert!(cache.cache().is_empty());

        let directives = cache.cache_with(&CacheOptions::default().url("/blog?page=2"));
        assert_eq!(directives.get(CONTROL_HEADER), Some("public, max-age=7200"));
    }

    #[test]
    fn test_empty_url_override_is_ignored() {
        let config = CacheConfig::builder().excluded_urls("/admin*").build();
        let request = live("/admin");
        let cache = Cache::new(&config, &request);
        assert!(cache.cache_with(&CacheOptions::default().url("")).is_empty());
    }

    #[test]
    fn test_decision_reports_exclusion() {
        let config = CacheConfig::default();
        let request = RequestContext::builder().method("POST").interactive(true).build();
        let cache = Cache::new(&config, &request);
        assert_eq!(
            cache.decide(),
            Decision::Excluded(Exclusion::Method("POST".to_string()))
        );
        assert!(!should_cache(&config, &request));
    }

    #[test]
    fn test_vary_and_tags_follow_control() {
        let config = CacheConfig::default();
        let request = live("/");
        let mut cache = Cache::new(&config, &request);
        cache.add_vary("cookie=lang").add_tag("home");
        let names: Vec<_> = cache
            .cache()
            .headers()
            .iter()
            .map(|header| header.name)
            .collect();
        assert_eq!(names, vec![CONTROL_HEADER, VARY_HEADER, TAG_HEADER]);
    }

    #[test]
    fn test_purge_clears_caching_headers() {
        let config = CacheConfig::default();
        let request = live("/");
        let cache = Cache::new(&config, &request);
        let directives = cache.purge_all();
        assert!(directives.clears_caching_headers());
        assert_eq!(directives.headers(), &[Header::new(PURGE_HEADER, "*")]);
    }

    #[test]
    fn test_purge_without_target_is_empty() {
        let config = CacheConfig::default();
        let request = live("/");
        let cache = Cache::new(&config, &request);
        assert!(cache.purge().is_empty());
        assert!(cache.purge_tags(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_cookie_vary_header() {
        assert_eq!(
            Cache::cookie_vary_header("session").to_string(),
            "X-LiteSpeed-Vary: cookie=session"
        );
    }
}
