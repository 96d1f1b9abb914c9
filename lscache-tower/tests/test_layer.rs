use std::convert::Infallible;

use http::header::COOKIE;
use http::{Request, Response};
use lscache::{CacheConfig, CacheOptions, CacheType};
use lscache_http::{CACHE_CONTROL, PURGE, TAG, VARY};
use lscache_tower::{LiteSpeedCacheLayer, ResponseIntent};
use pretty_assertions::assert_eq;
use tower::{Layer, ServiceExt, service_fn};

async fn call(
    config: CacheConfig,
    request: Request<()>,
    intent: Option<ResponseIntent>,
) -> Response<()> {
    let service = LiteSpeedCacheLayer::new(config).layer(service_fn(move |_: Request<()>| {
        let intent = intent.clone();
        async move {
            let mut response = Response::new(());
            if let Some(intent) = intent {
                response.extensions_mut().insert(intent);
            }
            Ok::<_, Infallible>(response)
        }
    }));
    service.oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<()> {
    Request::get(uri).body(()).unwrap()
}

#[tokio::test]
async fn test_default_intent_caches() {
    let config = CacheConfig::builder().lifetime(600).build();
    let response = call(config, get("/blog"), None).await;
    assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=600");
    assert_eq!(response.headers().len(), 1);
}

#[tokio::test]
async fn test_intent_tags_and_vary() {
    let intent = ResponseIntent::cache_with(
        CacheOptions::default()
            .cache_type(CacheType::Private)
            .lifetime(360),
    )
    .tags(["articles", "pages"])
    .vary("value=default");
    let response = call(CacheConfig::default(), get("/blog"), Some(intent)).await;

    let headers = response.headers();
    assert_eq!(headers[CACHE_CONTROL], "private, max-age=360");
    assert_eq!(headers[TAG], "articles, pages");
    assert_eq!(headers[VARY], "value=default");
}

#[tokio::test]
async fn test_intent_is_consumed() {
    let response = call(
        CacheConfig::default(),
        get("/"),
        Some(ResponseIntent::cache()),
    )
    .await;
    assert!(response.extensions().get::<ResponseIntent>().is_none());
}

#[tokio::test]
async fn test_excluded_request_gets_no_headers() {
    let config = CacheConfig::builder().excluded_urls("/admin*").build();
    let response = call(config, get("/admin/users"), None).await;
    assert!(response.headers().is_empty());

    let response = call(
        CacheConfig::default(),
        Request::post("/blog").body(()).unwrap(),
        None,
    )
    .await;
    assert!(response.headers().is_empty());
}

#[tokio::test]
async fn test_bypass_cookie() {
    let request = Request::get("/blog")
        .header(COOKIE, "cache_bypass=1")
        .body(())
        .unwrap();
    let response = call(CacheConfig::default(), request, None).await;
    assert!(response.headers().is_empty());
}

#[tokio::test]
async fn test_purge_intents() {
    let response = call(
        CacheConfig::default(),
        Request::post("/posts/1").body(()).unwrap(),
        Some(ResponseIntent::purge().uri("/posts/1").tags("articles")),
    )
    .await;
    assert_eq!(response.headers()[PURGE], "/posts/1 tag=articles");

    let response = call(
        CacheConfig::default(),
        get("/"),
        Some(ResponseIntent::purge_all()),
    )
    .await;
    assert_eq!(response.headers()[PURGE], "*");
    assert_eq!(response.headers().len(), 1);

    let response = call(
        CacheConfig::default(),
        get("/"),
        Some(ResponseIntent::purge_tags(["articles", "pages"])),
    )
    .await;
    assert_eq!(response.headers()[PURGE], "tag=articles, tag=pages");
}

#[tokio::test]
async fn test_skip_intent() {
    let response = call(
        CacheConfig::default(),
        get("/"),
        Some(ResponseIntent::skip()),
    )
    .await;
    assert!(response.headers().is_empty());
}

#[tokio::test]
async fn test_invalid_tag_leaves_response_intact() {
    let response = call(
        CacheConfig::default(),
        get("/"),
        Some(ResponseIntent::cache().tags("bad\ntag")),
    )
    .await;
    assert!(response.headers().is_empty());
}
