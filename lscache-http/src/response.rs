use http::{HeaderMap, HeaderName, HeaderValue, Response};
use lscache::ResponseDirectives;
use lscache::directive::{CONTROL_HEADER, PURGE_HEADER, TAG_HEADER, VARY_HEADER};

use crate::Error;

/// `X-LiteSpeed-Cache-Control`, lowercased as required by the `http` crate.
pub const CACHE_CONTROL: HeaderName = HeaderName::from_static("x-litespeed-cache-control");
/// `X-LiteSpeed-Vary`.
pub const VARY: HeaderName = HeaderName::from_static("x-litespeed-vary");
/// `X-LiteSpeed-Tag`.
pub const TAG: HeaderName = HeaderName::from_static("x-litespeed-tag");
/// `X-LiteSpeed-Purge`.
pub const PURGE: HeaderName = HeaderName::from_static("x-litespeed-purge");

/// Writes [`ResponseDirectives`] onto HTTP headers.
///
/// Each directive header replaces a previous value of the same name, so
/// applying cache directives twice leaves only the latest ones. When the
/// directives clear caching headers (every purge does), earlier control,
/// vary and tag headers are removed first.
pub trait ApplyDirectives {
    /// Applies `directives`. On error nothing has been changed.
    fn apply_directives(&mut self, directives: &ResponseDirectives) -> Result<(), Error>;
}

impl ApplyDirectives for HeaderMap {
    fn apply_directives(&mut self, directives: &ResponseDirectives) -> Result<(), Error> {
        let encoded = directives
            .headers()
            .iter()
            .filter_map(|header| {
                let Some(name) = header_name(header.name) else {
                    tracing::warn!(header = header.name, "skipping unknown directive header");
                    return None;
                };
                Some(HeaderValue::try_from(header.value.as_str()).map(|value| (name, value)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if directives.clears_caching_headers() {
            for name in [CACHE_CONTROL, VARY, TAG] {
                self.remove(name);
            }
        }
        for (name, value) in encoded {
            tracing::trace!(header = %name, ?value, "writing directive header");
            self.insert(name, value);
        }
        Ok(())
    }
}

/// Wire name of one of the directive header names.
fn header_name(name: &str) -> Option<HeaderName> {
    [
        (CONTROL_HEADER, CACHE_CONTROL),
        (VARY_HEADER, VARY),
        (TAG_HEADER, TAG),
        (PURGE_HEADER, PURGE),
    ]
    .into_iter()
    .find_map(|(known, header)| known.eq_ignore_ascii_case(name).then_some(header))
}

impl<B> ApplyDirectives for Response<B> {
    fn apply_directives(&mut self, directives: &ResponseDirectives) -> Result<(), Error> {
        self.headers_mut().apply_directives(directives)
    }
}
