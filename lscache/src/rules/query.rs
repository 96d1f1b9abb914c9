//! Query string exclusion rule, including the bypass query parameter.

use std::borrow::Cow;

use lscache_core::pattern;
use lscache_core::{Predicate, PredicateResult};

use super::Candidate;
use crate::decision::Exclusion;

/// Excludes requests whose query string matches one of the patterns or the
/// synthetic `*<bypass_cookie>=1*` pattern.
///
/// Query strings are matched as they are, without slash stripping.
#[derive(Debug)]
pub struct ExcludedQueryStrings<'c, P> {
    patterns: &'c [String],
    bypass: String,
    inner: P,
}

/// Extension trait for adding the query string exclusion rule to a chain.
///
/// Implemented for every [`Predicate`].
pub trait QueryPredicate: Sized {
    /// Adds the query string rule. The bypass pattern is derived from
    /// `bypass_cookie` when the rule is created.
    fn excluded_query_strings<'c>(
        self,
        patterns: &'c [String],
        bypass_cookie: &str,
    ) -> ExcludedQueryStrings<'c, Self>;
}

impl<P> QueryPredicate for P
where
    P: Predicate,
{
    fn excluded_query_strings<'c>(
        self,
        patterns: &'c [String],
        bypass_cookie: &str,
    ) -> ExcludedQueryStrings<'c, Self> {
        ExcludedQueryStrings {
            patterns,
            bypass: bypass_pattern(bypass_cookie),
            inner: self,
        }
    }
}

/// Pattern matching the bypass flag anywhere in a query string.
pub fn bypass_pattern(bypass_cookie: &str) -> String {
    format!("*{bypass_cookie}=1*")
}

/// First of `patterns`, then the bypass pattern, matching `query`.
pub fn first_match<'c>(
    patterns: &'c [String],
    bypass_cookie: &str,
    query: &str,
) -> Option<Cow<'c, str>> {
    scan(patterns, &bypass_pattern(bypass_cookie), query)
}

fn scan<'c>(patterns: &'c [String], bypass: &str, query: &str) -> Option<Cow<'c, str>> {
    patterns
        .iter()
        .map(String::as_str)
        .find(|pattern| pattern::matches(pattern, query))
        .map(Cow::Borrowed)
        .or_else(|| pattern::matches(bypass, query).then(|| Cow::Owned(bypass.to_string())))
}

impl<'r, P> Predicate for ExcludedQueryStrings<'_, P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            match scan(self.patterns, &self.bypass, candidate.target().query()) {
                Some(pattern) => candidate.verdict(false, || {
                    Exclusion::ExcludedQueryString(pattern.into_owned())
                }),
                None => PredicateResult::Cacheable(candidate),
            }
        })
    }
}
