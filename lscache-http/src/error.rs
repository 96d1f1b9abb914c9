use http::header::InvalidHeaderValue;
use thiserror::Error;

/// Error writing directives onto an HTTP response.
#[derive(Debug, Error)]
pub enum Error {
    /// A tag or vary value contains characters not allowed in header values.
    #[error("invalid directive header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}
