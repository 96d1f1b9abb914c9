//! Request kind rules: XHR requests and request methods.

use std::collections::BTreeSet;

use lscache_core::{Predicate, PredicateResult};

use super::Candidate;
use crate::decision::Exclusion;

/// Excludes XHR requests unless they are explicitly cacheable.
#[derive(Debug)]
pub struct Ajax<P> {
    cacheable: bool,
    inner: P,
}

/// Excludes requests whose method is not a cacheable verb.
///
/// Methods are compared case-insensitively against upper-cased verbs. A
/// request without a method passes: the rule only applies to what the host
/// actually reported.
#[derive(Debug)]
pub struct Method<'c, P> {
    verbs: &'c BTreeSet<String>,
    inner: P,
}

/// Extension trait for adding request kind rules to a rule chain.
///
/// Implemented for every [`Predicate`].
pub trait MethodPredicate: Sized {
    /// Adds the XHR rule.
    fn ajax(self, cacheable: bool) -> Ajax<Self>;
    /// Adds the cacheable method rule. `verbs` must be upper-cased.
    fn verbs(self, verbs: &BTreeSet<String>) -> Method<'_, Self>;
}

impl<P> MethodPredicate for P
where
    P: Predicate,
{
    fn ajax(self, cacheable: bool) -> Ajax<Self> {
        Ajax {
            cacheable,
            inner: self,
        }
    }

    fn verbs(self, verbs: &BTreeSet<String>) -> Method<'_, Self> {
        Method { verbs, inner: self }
    }
}

impl<'r, P> Predicate for Ajax<P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            let cacheable = self.cacheable || !candidate.request().is_ajax();
            candidate.verdict(cacheable, || Exclusion::Ajax)
        })
    }
}

impl<'r, P> Predicate for Method<'_, P>
where
    P: Predicate<Subject = Candidate<'r>>,
{
    type Subject = P::Subject;

    fn check(&self, candidate: Self::Subject) -> PredicateResult<Self::Subject> {
        self.inner.check(candidate).and_then(|candidate| {
            match candidate.request().method() {
                Some(method) => {
                    let cacheable = self.verbs.contains(&method.to_ascii_uppercase());
                    candidate.verdict(cacheable, || Exclusion::Method(method.to_string()))
                }
                None => PredicateResult::Cacheable(candidate),
            }
        })
    }
}
