#![warn(missing_docs)]
//! # lscache
//!
//! Decides whether a response may be cached by a LiteSpeed server and
//! builds the `X-LiteSpeed-*` directive headers that tell it so.
//!
//! A [`CacheConfig`] holds the policy. For every request the host builds a
//! [`RequestContext`], wraps both in a [`Cache`] handle, accumulates tags and
//! vary values, and asks for either cache or purge directives:
//!
//! ```
//! use lscache::{Cache, CacheConfig, RequestContext};
//!
//! let config = CacheConfig::builder().excluded_urls("/admin*").build();
//! let request = RequestContext::builder()
//!     .method("GET")
//!     .url("/admin/users")
//!     .interactive(true)
//!     .build();
//!
//! let cache = Cache::new(&config, &request);
//! assert!(!cache.should_cache());
//! assert!(cache.cache().is_empty());
//! assert_eq!(cache.purge_all().get("X-LiteSpeed-Purge"), Some("*"));
//! ```
//!
//! The eligibility rules live in [`rules`]; their outcome is a [`Decision`].

pub mod config;
pub mod decision;
pub mod engine;
pub mod rules;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use decision::{Decision, Exclusion};
pub use engine::{Cache, CacheOptions, should_cache};

pub use lscache_core::{
    CacheType, ConfigurationError, DirectiveSet, Header, RequestContext, RequestTarget,
    ResponseDirectives, Values, directive, pattern,
};
