use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Future;
use futures::ready;
use http::Response;
use lscache::{CacheConfig, RequestContext};
use lscache_http::ApplyDirectives;
use pin_project::pin_project;

use crate::intent::ResponseIntent;

/// Response future of [`LiteSpeedCacheService`](crate::LiteSpeedCacheService).
///
/// Once the upstream responds, the [`ResponseIntent`] is taken out of the
/// response extensions and turned into directive headers.
#[pin_project]
pub struct ResponseFuture<F> {
    #[pin]
    inner: F,
    config: Arc<CacheConfig>,
    request: RequestContext,
}

impl<F> ResponseFuture<F> {
    /// Wraps the upstream future for the request described by `request`.
    pub fn new(inner: F, config: Arc<CacheConfig>, request: RequestContext) -> Self {
        Self {
            inner,
            config,
            request,
        }
    }
}

impl<F, B, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = ready!(this.inner.poll(cx))?;

        let intent = response
            .extensions_mut()
            .remove::<ResponseIntent>()
            .unwrap_or_default();
        let directives = intent.into_response_directives(this.config, this.request);
        if let Err(error) = response.apply_directives(&directives) {
            tracing::warn!(%error, "failed to write cache directives");
        }

        Poll::Ready(Ok(response))
    }
}
