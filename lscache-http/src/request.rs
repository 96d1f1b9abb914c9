use http::request::Parts;
use http::{HeaderMap, HeaderName, Method, Request, Uri};
use lscache::{RequestContext, RequestTarget};

use crate::cookie;

/// Header set by browsers' XHR helpers.
pub const AJAX_HEADER: HeaderName = HeaderName::from_static("x-requested-with");

const AJAX_VALUE: &str = "XMLHttpRequest";

/// Builds the decision context for a live HTTP request.
///
/// The result is always interactive: it was derived from a request that is
/// being served.
pub fn request_context<B>(request: &Request<B>) -> RequestContext {
    build(request.method(), request.uri(), request.headers())
}

/// Same as [`request_context`], for a request split into parts.
pub fn from_parts(parts: &Parts) -> RequestContext {
    build(&parts.method, &parts.uri, &parts.headers)
}

fn build(method: &Method, uri: &Uri, headers: &HeaderMap) -> RequestContext {
    RequestContext::builder()
        .method(method.as_str())
        .ajax(is_ajax(headers))
        .cookies(cookie::parse(headers))
        .interactive(true)
        .target(RequestTarget::from_uri(uri))
        .build()
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(AJAX_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == AJAX_VALUE)
}
