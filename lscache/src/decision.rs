//! Outcome of the cache eligibility rules.

use std::fmt;

/// The rule that made a request non-cacheable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Caching is disabled in the configuration.
    Disabled,
    /// The configured lifetime is zero.
    ZeroLifetime,
    /// XHR request while XHR caching is off.
    Ajax,
    /// Request method is not one of the cacheable verbs.
    Method(String),
    /// The bypass cookie is set to `1`.
    BypassCookie,
    /// Execution is not part of a live HTTP request.
    NonInteractive,
    /// The path matched this URL exclusion pattern.
    ExcludedUrl(String),
    /// The query string matched this exclusion pattern.
    ExcludedQueryString(String),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Disabled => f.write_str("cache is disabled"),
            Exclusion::ZeroLifetime => f.write_str("cache lifetime is zero"),
            Exclusion::Ajax => f.write_str("ajax requests are not cached"),
            Exclusion::Method(method) => write!(f, "method {method} is not cacheable"),
            Exclusion::BypassCookie => f.write_str("bypass cookie is set"),
            Exclusion::NonInteractive => f.write_str("not an interactive http request"),
            Exclusion::ExcludedUrl(pattern) => write!(f, "url matches excluded pattern `{pattern}`"),
            Exclusion::ExcludedQueryString(pattern) => {
                write!(f, "query string matches excluded pattern `{pattern}`")
            }
        }
    }
}

/// Whether a request may be cached, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No rule excluded the request.
    Cacheable,
    /// The first rule that excluded the request.
    Excluded(Exclusion),
}

impl Decision {
    /// Returns `true` for [`Decision::Cacheable`].
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Decision::Cacheable)
    }

    /// The exclusion, if any.
    pub fn exclusion(&self) -> Option<&Exclusion> {
        match self {
            Decision::Cacheable => None,
            Decision::Excluded(exclusion) => Some(exclusion),
        }
    }
}
