//! Error types for cache configuration.

use thiserror::Error;

/// Error raised when a cache configuration value is not supported.
///
/// This is a configuration defect, not a runtime condition: it is returned
/// synchronously by the setter that received the value, and the
/// configuration it was applied to is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The cache type is neither `public` nor `private`.
    #[error("unsupported cache type `{0}`, expected `public` or `private`")]
    UnsupportedCacheType(String),
}
