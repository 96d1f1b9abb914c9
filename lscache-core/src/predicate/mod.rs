//! Caching decision predicates.
//!
//! This module provides the [`Predicate`] trait and [`PredicateResult`] enum
//! used to decide whether a request may be cached by the proxy.
//!
//! ## Overview
//!
//! A predicate evaluates a subject and returns it wrapped as either
//! `Cacheable` or `NonCacheable`. Predicates are chained by wrapping: each
//! predicate holds an `inner` predicate, checks it first, and only runs its
//! own test when the inner one kept the subject cacheable. The innermost
//! predicate (usually [`Neutral`]) therefore runs first and the outermost
//! last, and `NonCacheable` is sticky for the rest of the chain.
//!
//! Evaluation is synchronous: every check is a pure function of the subject
//! and the predicate's own configuration.

pub mod neutral;

pub use neutral::Neutral;

/// Result of a predicate evaluation.
///
/// Preserves ownership of the subject so it can flow through a chain of
/// predicates without cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateResult<S> {
    /// Subject may be cached.
    Cacheable(S),
    /// Subject must not be cached.
    NonCacheable(S),
}

impl<S> PredicateResult<S> {
    /// Chains predicate checks.
    ///
    /// If `Cacheable`, applies the function which may return `Cacheable` or
    /// `NonCacheable`. If already `NonCacheable`, short-circuits without
    /// calling the function.
    pub fn and_then<F>(self, f: F) -> PredicateResult<S>
    where
        F: FnOnce(S) -> PredicateResult<S>,
    {
        match self {
            PredicateResult::Cacheable(value) => f(value),
            PredicateResult::NonCacheable(value) => PredicateResult::NonCacheable(value),
        }
    }

    /// Returns `true` for [`PredicateResult::Cacheable`].
    pub fn is_cacheable(&self) -> bool {
        matches!(self, PredicateResult::Cacheable(_))
    }

    /// Unwraps the subject regardless of the outcome.
    pub fn into_inner(self) -> S {
        match self {
            PredicateResult::Cacheable(value) | PredicateResult::NonCacheable(value) => value,
        }
    }
}

/// Trait for evaluating whether a subject may be cached.
///
/// The `check` method takes ownership of the subject and returns it wrapped
/// in a [`PredicateResult`].
pub trait Predicate {
    /// The type being evaluated by this predicate.
    type Subject;

    /// Evaluate whether the subject may be cached.
    fn check(&self, subject: Self::Subject) -> PredicateResult<Self::Subject>;
}

impl<T> Predicate for Box<T>
where
    T: Predicate + ?Sized,
{
    type Subject = T::Subject;

    fn check(&self, subject: T::Subject) -> PredicateResult<T::Subject> {
        self.as_ref().check(subject)
    }
}

impl<T> Predicate for &T
where
    T: Predicate + ?Sized,
{
    type Subject = T::Subject;

    fn check(&self, subject: T::Subject) -> PredicateResult<T::Subject> {
        (*self).check(subject)
    }
}
