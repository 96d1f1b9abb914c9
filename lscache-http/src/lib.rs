//! LiteSpeed cache directives for [`http`] requests and responses.
//!
//! [`request_context`] turns an incoming request into the
//! [`RequestContext`](lscache::RequestContext) the decision engine works
//! with, and [`ApplyDirectives`] writes the resulting directives onto a
//! response or header map.

pub mod cookie;
mod error;
mod request;
mod response;

pub use error::Error;
pub use request::{AJAX_HEADER, from_parts, request_context};
pub use response::{ApplyDirectives, CACHE_CONTROL, PURGE, TAG, VARY};
