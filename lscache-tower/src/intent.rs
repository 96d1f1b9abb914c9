use lscache::{
    Cache, CacheConfig, CacheOptions, DirectiveSet, RequestContext, ResponseDirectives, Values,
};

/// What the middleware should do with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Cache the response if the rules allow it.
    Cache(CacheOptions),
    /// Purge the URI and tags of the intent.
    Purge,
    /// Purge every cached object.
    PurgeAll,
    /// Purge the given tags.
    PurgeTags(Vec<String>),
    /// Write no directives.
    Skip,
}

impl Default for Action {
    fn default() -> Self {
        Action::Cache(CacheOptions::default())
    }
}

/// Cache instructions a handler attaches to its response.
///
/// ```
/// use http::Response;
/// use lscache_tower::ResponseIntent;
///
/// let mut response = Response::new(());
/// response
///     .extensions_mut()
///     .insert(ResponseIntent::cache().tags(["articles", "post-1"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseIntent {
    directives: DirectiveSet,
    action: Action,
}

impl ResponseIntent {
    /// Caches the response with the configured type and lifetime.
    pub fn cache() -> Self {
        Self::default()
    }

    /// Caches the response with per-response overrides.
    pub fn cache_with(options: CacheOptions) -> Self {
        Self::with_action(Action::Cache(options))
    }

    /// Purges the URI and tags added to this intent.
    pub fn purge() -> Self {
        Self::with_action(Action::Purge)
    }

    /// Purges every cached object.
    pub fn purge_all() -> Self {
        Self::with_action(Action::PurgeAll)
    }

    /// Purges the given tags.
    pub fn purge_tags(tags: impl Into<Values>) -> Self {
        Self::with_action(Action::PurgeTags(tags.into().into_vec()))
    }

    /// Leaves the response without directives.
    pub fn skip() -> Self {
        Self::with_action(Action::Skip)
    }

    fn with_action(action: Action) -> Self {
        Self {
            directives: DirectiveSet::new(),
            action,
        }
    }

    /// Adds tags to the cached object or the purge.
    pub fn tags(mut self, tags: impl Into<Values>) -> Self {
        self.directives.add_tags(tags);
        self
    }

    /// Adds vary values to the cached object.
    pub fn vary(mut self, vary: impl Into<Values>) -> Self {
        self.directives.add_vary(vary);
        self
    }

    /// Sets the URI to purge.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.directives.set_uri(uri);
        self
    }

    /// What the middleware will do.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Tags, vary values and URI added so far.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    pub(crate) fn into_response_directives(
        self,
        config: &CacheConfig,
        request: &RequestContext,
    ) -> ResponseDirectives {
        let cache = Cache::with_directives(config, request, self.directives);
        match self.action {
            Action::Cache(options) => cache.cache_with(&options),
            Action::Purge => cache.purge(),
            Action::PurgeAll => cache.purge_all(),
            Action::PurgeTags(tags) => cache.purge_tags(tags),
            Action::Skip => ResponseDirectives::none(),
        }
    }
}
