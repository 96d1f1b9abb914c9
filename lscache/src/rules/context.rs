//! Execution context rules: bypass cookie and live HTTP request.

use lscache_core::{Predicate, PredicateResult};

use super::Candidate;
use crate::decision::Exclusion;

/// Excludes requests carrying the bypass cookie with value `1`.
///
/// Skipped when the request context is forced interactive.
#[derive(Debug)]
pub struct BypassCookie<'c, P> {
    name: &'c str,
    inner: P,
}

/// Excludes decisions made outside a live HTTP request, such as command-line
/// tools or background jobs, unless forced interactive.
#[derive(Debug)]
pub struct Interactive<P> {
    inner: P,
}

/// Extension trait for adding execution context rules to a rule chain.
///
/// Implemented for every [`Predicate`].
pub trait ContextPredicate: Sized {
    /// Adds the bypass cookie rule for the cookie called `name`.
    fn bypass_cookie(self, name: &str) -> BypassCookie<'_, Self>;
    /// Adds the live HTTP request rule.
    fn interactive(self) -> Interactive<Self>;
}

impl<P> ContextPredicate for P
where
    P: Predicate,
{
    fn bypass_cookie(self, name: &str) -> BypassCookie<'_, Self> {
        BypassCookie { name, inner: self }
    }

    fn interactive(self) -> Interactive<Self> {
        Interactive { inner: self }
    }
}

impl<'r, P> Predicate for BypassCookie<'_, P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            let request = candidate.request();
            let bypassed = request.has_bypass_cookie(self.name) && !request.is_forced_interactive();
            candidate.verdict(!bypassed, || Exclusion::BypassCookie)
        })
    }
}

impl<'r, P> Predicate for Interactive<P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            let interactive = candidate.request().allows_directives();
            candidate.verdict(interactive, || Exclusion::NonInteractive)
        })
    }
}

#[cfg(test)]
mod tests {
    use lscache_core::{Neutral, RequestContext};

    use super::*;

    #[test]
    fn test_bypass_cookie_excludes() {
        let request = RequestContext::builder()
            .cookie("cache_bypass", "1")
            .interactive(true)
            .build();
        let result = Neutral::<Candidate<'_>>::new()
            .bypass_cookie("cache_bypass")
            .check(Candidate::new(&request, request.target()));
        assert_eq!(result.into_inner().exclusion(), Some(&Exclusion::BypassCookie));
    }

    #[test]
    fn test_bypass_cookie_with_other_value_passes() {
        let request = RequestContext::builder().cookie("cache_bypass", "0").build();
        let result = Neutral::<Candidate<'_>>::new()
            .bypass_cookie("cache_bypass")
            .check(Candidate::new(&request, request.target()));
        assert!(result.is_cacheable());
    }

    #[test]
    fn test_forced_context_ignores_bypass_cookie() {
        let request = RequestContext::builder()
            .cookie("cache_bypass", "1")
            .force_interactive(true)
            .build();
        let result = Neutral::<Candidate<'_>>::new()
            .bypass_cookie("cache_bypass")
            .interactive()
            .check(Candidate::new(&request, request.target()));
        assert!(result.is_cacheable());
    }

    #[test]
    fn test_non_interactive_excludes() {
        let request = RequestContext::builder().interactive(false).build();
        let result = Neutral::<Candidate<'_>>::new()
            .interactive()
            .check(Candidate::new(&request, request.target()));
        assert_eq!(result.into_inner().exclusion(), Some(&Exclusion::NonInteractive));
    }
}
