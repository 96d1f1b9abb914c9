use std::sync::Arc;
use std::task::{Context, Poll};

use http::{Request, Response};
use lscache::CacheConfig;
use tower::Service;

use crate::future::ResponseFuture;

/// Writes LiteSpeed cache directives onto the upstream's responses.
#[derive(Debug, Clone)]
pub struct LiteSpeedCacheService<S> {
    upstream: S,
    config: Arc<CacheConfig>,
}

impl<S> LiteSpeedCacheService<S> {
    /// Wraps `upstream`.
    pub fn new(upstream: S, config: Arc<CacheConfig>) -> Self {
        Self { upstream, config }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LiteSpeedCacheService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // The context is taken before the request moves into the upstream.
        let context = lscache_http::request_context(&request);
        ResponseFuture::new(
            self.upstream.call(request),
            Arc::clone(&self.config),
            context,
        )
    }
}
