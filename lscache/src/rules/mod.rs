//! Cache eligibility rules.
//!
//! Each rule is a [`Predicate`] that wraps the previous one, so a chain is
//! evaluated from the innermost rule outwards and stops at the first
//! exclusion. [`chain`] assembles the rules in their fixed order:
//!
//! | # | Rule | Excludes when |
//! |---|------|---------------|
//! | 1 | [`policy::Enabled`] | caching is disabled |
//! | 2 | [`policy::Lifetime`] | the lifetime is zero |
//! | 3 | [`method::Ajax`] | XHR request and XHR caching is off |
//! | 4 | [`method::Method`] | the method is provided and not cacheable |
//! | 5 | [`context::BypassCookie`] | the bypass cookie equals `1` |
//! | 6 | [`context::Interactive`] | not a live HTTP request |
//! | 7 | [`path::ExcludedUrls`] | the path matches an excluded URL |
//! | 8 | [`query::ExcludedQueryStrings`] | the query matches an exclusion or the bypass pattern |
//!
//! Context-free checks come first and pattern scans last. Every rule is a
//! pure function of the candidate, so the order never changes the outcome,
//! only which exclusion gets reported.

pub mod context;
pub mod method;
pub mod path;
pub mod policy;
pub mod query;

use lscache_core::{Neutral, Predicate, PredicateResult, RequestContext, RequestTarget};

use crate::config::CacheConfig;
use crate::decision::{Decision, Exclusion};

pub use context::{BypassCookie, ContextPredicate, Interactive};
pub use method::{Ajax, Method, MethodPredicate};
pub use path::{ExcludedUrls, PathPredicate};
pub use policy::{Enabled, Lifetime, PolicyPredicate};
pub use query::{ExcludedQueryStrings, QueryPredicate};

/// Subject flowing through the rule chain.
///
/// Holds the request, the URL being decided (the request URL or a per-call
/// override) and, once a rule fails, the reason.
#[derive(Debug, Clone)]
pub struct Candidate<'r> {
    request: &'r RequestContext,
    target: &'r RequestTarget,
    exclusion: Option<Exclusion>,
}

impl<'r> Candidate<'r> {
    /// Creates a candidate for `target`.
    pub fn new(request: &'r RequestContext, target: &'r RequestTarget) -> Self {
        Self {
            request,
            target,
            exclusion: None,
        }
    }

    /// Request being decided.
    pub fn request(&self) -> &'r RequestContext {
        self.request
    }

    /// Path and query string being decided.
    pub fn target(&self) -> &'r RequestTarget {
        self.target
    }

    /// Rule that excluded the candidate, if any.
    pub fn exclusion(&self) -> Option<&Exclusion> {
        self.exclusion.as_ref()
    }

    /// Keeps the candidate cacheable when `cacheable`, otherwise records
    /// `exclusion` and marks it non-cacheable.
    pub fn verdict(
        self,
        cacheable: bool,
        exclusion: impl FnOnce() -> Exclusion,
    ) -> PredicateResult<Self> {
        if cacheable {
            PredicateResult::Cacheable(self)
        } else {
            let exclusion = exclusion();
            tracing::trace!(%exclusion, "cache rule excluded request");
            PredicateResult::NonCacheable(Self {
                exclusion: Some(exclusion),
                ..self
            })
        }
    }

    /// Converts the final chain result into a [`Decision`].
    ///
    /// Only [`verdict`](Self::verdict) marks a candidate non-cacheable, so
    /// the recorded exclusion is the outcome.
    pub fn into_decision(result: PredicateResult<Self>) -> Decision {
        match result.into_inner().exclusion {
            None => Decision::Cacheable,
            Some(exclusion) => Decision::Excluded(exclusion),
        }
    }
}

/// Builds the rule chain for `config`.
///
/// The chain is rebuilt for every decision, which also recomputes the
/// synthetic bypass query pattern from the current cookie name.
pub fn chain<'c, 'r>(config: &'c CacheConfig) -> impl Predicate<Subject = Candidate<'r>> {
    Neutral::<Candidate<'r>>::new()
        .enabled(config.enabled())
        .lifetime(config.lifetime())
        .ajax(config.ajax_cacheable())
        .verbs(config.cacheable_verbs())
        .bypass_cookie(config.bypass_cookie())
        .interactive()
        .excluded_urls(config.excluded_urls())
        .excluded_query_strings(config.excluded_query_strings(), config.bypass_cookie())
}
