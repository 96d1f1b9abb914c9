//! Configuration switches: caching enabled and non-zero lifetime.

use lscache_core::{Predicate, PredicateResult};

use super::Candidate;
use crate::decision::Exclusion;

/// Excludes every request when caching is disabled.
#[derive(Debug)]
pub struct Enabled<P> {
    enabled: bool,
    inner: P,
}

/// Excludes every request when the lifetime is zero ("never cache").
#[derive(Debug)]
pub struct Lifetime<P> {
    seconds: u64,
    inner: P,
}

/// Extension trait for adding the configuration switches to a rule chain.
///
/// Implemented for every [`Predicate`].
pub trait PolicyPredicate: Sized {
    /// Adds the enabled switch.
    fn enabled(self, enabled: bool) -> Enabled<Self>;
    /// Adds the zero-lifetime check.
    fn lifetime(self, seconds: u64) -> Lifetime<Self>;
}

impl<P> PolicyPredicate for P
where
    P: Predicate,
{
    fn enabled(self, enabled: bool) -> Enabled<Self> {
        Enabled {
            enabled,
            inner: self,
        }
    }

    fn lifetime(self, seconds: u64) -> Lifetime<Self> {
        Lifetime {
            seconds,
            inner: self,
        }
    }
}

impl<'r, P> Predicate for Enabled<P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner
            .check(candidate)
            .and_then(|candidate| candidate.verdict(self.enabled, || Exclusion::Disabled))
    }
}

impl<'r, P> Predicate for Lifetime<P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner
            .check(candidate)
            .and_then(|candidate| candidate.verdict(self.seconds > 0, || Exclusion::ZeroLifetime))
    }
}

#[cfg(test)]
mod tests {
    use lscache_core::{Neutral, RequestContext};

    use super::*;

    #[test]
    fn test_disabled_excludes() {
        let request = RequestContext::default();
        let result = Neutral::<Candidate<'_>>::new()
            .enabled(false)
            .check(Candidate::new(&request, request.target()));
        assert_eq!(result.into_inner().exclusion(), Some(&Exclusion::Disabled));
    }

    #[test]
    fn test_zero_lifetime_excludes() {
        let request = RequestContext::default();
        let rule = Neutral::<Candidate<'_>>::new().enabled(true).lifetime(0);
        let result = rule.check(Candidate::new(&request, request.target()));
        assert!(!result.is_cacheable());
        assert_eq!(result.into_inner().exclusion(), Some(&Exclusion::ZeroLifetime));

        let rule = Neutral::<Candidate<'_>>::new().enabled(true).lifetime(1);
        assert!(rule.check(Candidate::new(&request, request.target())).is_cacheable());
    }
}
