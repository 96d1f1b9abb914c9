//! URL exclusion rule.

use lscache_core::pattern;
use lscache_core::{Predicate, PredicateResult};

use super::Candidate;
use crate::decision::Exclusion;

/// Excludes requests whose path matches one of the URL patterns.
///
/// A single leading `/` is ignored on both the pattern and the path, so
/// `/admin*` and `admin*` exclude the same URLs.
#[derive(Debug)]
pub struct ExcludedUrls<'c, P> {
    patterns: &'c [String],
    inner: P,
}

/// Extension trait for adding the URL exclusion rule to a rule chain.
///
/// Implemented for every [`Predicate`].
pub trait PathPredicate: Sized {
    /// Adds the URL exclusion rule.
    fn excluded_urls(self, patterns: &[String]) -> ExcludedUrls<'_, Self>;
}

impl<P> PathPredicate for P
where
    P: Predicate,
{
    fn excluded_urls(self, patterns: &[String]) -> ExcludedUrls<'_, Self> {
        ExcludedUrls {
            patterns,
            inner: self,
        }
    }
}

/// First pattern in `patterns` matching `path`.
pub fn first_match<'c>(patterns: &'c [String], path: &str) -> Option<&'c str> {
    patterns
        .iter()
        .map(String::as_str)
        .find(|pattern| pattern::matches_path(pattern, path))
}

impl<'r, P> Predicate for ExcludedUrls<'_, P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            match first_match(self.patterns, candidate.target().path()) {
                Some(pattern) => {
                    candidate.verdict(false, || Exclusion::ExcludedUrl(pattern.to_string()))
                }
                None => PredicateResult::Cacheable(candidate),
            }
        })
    }
}
