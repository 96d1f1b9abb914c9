#![warn(missing_docs)]
//! Tower middleware that writes LiteSpeed cache directives.
//!
//! The layer decides every request against a shared [`CacheConfig`] and
//! writes the resulting `X-LiteSpeed-*` headers onto the response. Handlers
//! steer it by inserting a [`ResponseIntent`] into the response extensions;
//! a response without one is cached with the configured defaults.
//!
//! [`CacheConfig`]: lscache::CacheConfig

mod future;
mod intent;
mod layer;
mod service;

pub use future::ResponseFuture;
pub use intent::{Action, ResponseIntent};
pub use layer::LiteSpeedCacheLayer;
pub use service::LiteSpeedCacheService;
