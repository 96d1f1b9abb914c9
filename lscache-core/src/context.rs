//! Request-derived state consumed by the decision engine.
//!
//! A [`RequestContext`] is built once per request by the host layer and is
//! never mutated afterwards. It carries everything the cache rules need to
//! know about the request, so the engine itself never reads process-wide or
//! framework state.

use std::collections::BTreeMap;

use http::Uri;

/// Path and query string of the URL a decision is made for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTarget {
    path: String,
    query: String,
}

impl RequestTarget {
    /// Creates a target from an already split path and query string.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Splits a URL into its path and query components.
    ///
    /// Accepts absolute URLs (`https://host/path?q`) and origin-form request
    /// targets (`/path?q`). The fragment is discarded. A URL that does not
    /// parse yields an empty path and query.
    ///
    /// ```
    /// use lscache_core::RequestTarget;
    ///
    /// let target = RequestTarget::parse("https://example.com/test?foo=bar#top");
    /// assert_eq!(target.path(), "/test");
    /// assert_eq!(target.query(), "foo=bar");
    /// ```
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        url.parse::<Uri>()
            .map(|uri| Self::from_uri(&uri))
            .unwrap_or_default()
    }

    /// Path and query of an already parsed URI.
    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.path(), uri.query().unwrap_or_default())
    }

    /// URL path, possibly starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Everything the cache rules need to know about one request.
///
/// # Examples
///
/// ```
/// use lscache_core::RequestContext;
///
/// let request = RequestContext::builder()
///     .method("GET")
///     .url("/blog?page=2")
///     .cookie("cache_bypass", "1")
///     .interactive(true)
///     .build();
///
/// assert_eq!(request.method(), Some("GET"));
/// assert_eq!(request.target().query(), "page=2");
/// assert!(request.has_bypass_cookie("cache_bypass"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    method: Option<String>,
    ajax: bool,
    cookies: BTreeMap<String, String>,
    interactive: bool,
    force_interactive: bool,
    target: RequestTarget,
}

impl RequestContext {
    /// Creates a builder for a request context.
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Request method, if the host provided a non-empty one.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref().filter(|method| !method.is_empty())
    }

    /// Whether the request was made with `X-Requested-With: XMLHttpRequest`.
    pub fn is_ajax(&self) -> bool {
        self.ajax
    }

    /// Value of the named cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Whether the named cookie is present and exactly equal to `"1"`.
    pub fn has_bypass_cookie(&self, name: &str) -> bool {
        self.cookie(name) == Some("1")
    }

    /// Whether execution happens inside a live HTTP request.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether a test harness forced interactive behaviour.
    ///
    /// A forced context ignores the bypass cookie, and is treated as
    /// interactive for both caching and purging.
    pub fn is_forced_interactive(&self) -> bool {
        self.force_interactive
    }

    /// Interactive either for real or by override.
    pub fn allows_directives(&self) -> bool {
        self.interactive || self.force_interactive
    }

    /// Path and query string of the request URL.
    pub fn target(&self) -> &RequestTarget {
        &self.target
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug, Clone, Default)]
pub struct RequestContextBuilder {
    inner: RequestContext,
}

impl RequestContextBuilder {
    /// Sets the request method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.inner.method = Some(method.into());
        self
    }

    /// Marks the request as an XHR request.
    pub fn ajax(mut self, ajax: bool) -> Self {
        self.inner.ajax = ajax;
        self
    }

    /// Adds a request cookie.
    ///
    /// When a name repeats, the first value is kept: browsers send the
    /// cookie with the most specific path first.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.cookies.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Adds several request cookies, keeping the first value of a repeated
    /// name.
    pub fn cookies<I, N, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in cookies {
            self = self.cookie(name, value);
        }
        self
    }

    /// Sets whether execution happens inside a live HTTP request.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.inner.interactive = interactive;
        self
    }

    /// Forces interactive behaviour for test harnesses.
    pub fn force_interactive(mut self, force: bool) -> Self {
        self.inner.force_interactive = force;
        self
    }

    /// Sets the request URL, splitting it into path and query string.
    pub fn url(mut self, url: &str) -> Self {
        self.inner.target = RequestTarget::parse(url);
        self
    }

    /// Sets an already split request target.
    pub fn target(mut self, target: RequestTarget) -> Self {
        self.inner.target = target;
        self
    }

    /// Builds the request context.
    pub fn build(self) -> RequestContext {
        self.inner
    }
}
