#![warn(missing_docs)]
//! # lscache-core
//!
//! Core types for emitting LiteSpeed cache directives.
//!
//! This crate holds the protocol-level pieces that the decision engine in
//! `lscache` and the host adapters build on:
//!
//! - **Match** exclusion patterns ([`pattern`])
//! - **Decide** through chained predicates ([`Predicate`])
//! - **Describe** the request being decided ([`RequestContext`])
//! - **Encode** cache, vary, tag and purge headers ([`directive`])
//!
//! None of it performs I/O: the output is a [`ResponseDirectives`] value the
//! host writes onto its response.

pub mod context;
pub mod directive;
pub mod error;
pub mod pattern;
pub mod predicate;

pub use context::{RequestContext, RequestContextBuilder, RequestTarget};
pub use directive::{CacheType, DirectiveSet, Header, ResponseDirectives, Values};
pub use error::ConfigurationError;
pub use predicate::{Neutral, Predicate, PredicateResult};
