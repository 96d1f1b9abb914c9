use http::{HeaderValue, Request, Response};
use lscache::{Cache, CacheConfig, CacheType, CacheOptions};
use lscache_http::{ApplyDirectives, CACHE_CONTROL, Error, PURGE, TAG, VARY, request_context};
use pretty_assertions::assert_eq;

fn get(uri: &str) -> Request<()> {
    Request::get(uri).body(()).unwrap()
}

#[test]
fn test_cache_headers_are_written() {
    let config = CacheConfig::builder()
        .cache_type(CacheType::Private)
        .lifetime(360)
        .build();
    let request = request_context(&get("/blog"));
    let mut cache = Cache::new(&config, &request);
    cache.add_tags(["articles", "pages"]).add_vary("value=default");

    let mut response = Response::new(());
    response.apply_directives(&cache.cache()).unwrap();

    let headers = response.headers();
    assert_eq!(headers[CACHE_CONTROL], "private, max-age=360");
    assert_eq!(headers[TAG], "articles, pages");
    assert_eq!(headers[VARY], "value=default");
    assert_eq!(headers["X-LiteSpeed-Cache-Control"], "private, max-age=360");
}

#[test]
fn test_repeated_cache_replaces_control_header() {
    let config = CacheConfig::default();
    let request = request_context(&get("/test?foo=bar"));
    let cache = Cache::new(&config, &request);

    let mut response = Response::new(());
    response
        .apply_directives(&cache.cache_with(
            &CacheOptions::default().cache_type(CacheType::Private).lifetime(360),
        ))
        .unwrap();
    response
        .apply_directives(&cache.cache_with(&CacheOptions::default().lifetime(120)))
        .unwrap();

    let values: Vec<_> = response.headers().get_all(CACHE_CONTROL).iter().collect();
    assert_eq!(values, vec![&HeaderValue::from_static("public, max-age=120")]);
}

#[test]
fn test_purge_clears_caching_headers() {
    let config = CacheConfig::default();
    let request = request_context(&get("/"));
    let mut cache = Cache::new(&config, &request);
    cache.add_tag("home").add_vary("cookie=lang");

    let mut response = Response::new(());
    response.apply_directives(&cache.cache()).unwrap();
    assert!(response.headers().contains_key(TAG));

    response.apply_directives(&cache.purge_all()).unwrap();
    let headers = response.headers();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[PURGE], "*");
}

#[test]
fn test_excluded_request_leaves_response_untouched() {
    let config = CacheConfig::default();
    let request = request_context(&Request::post("/").body(()).unwrap());
    let cache = Cache::new(&config, &request);

    let mut response = Response::new(());
    response.apply_directives(&cache.cache()).unwrap();
    assert!(response.headers().is_empty());
}

#[test]
fn test_invalid_tag_value_is_an_error() {
    let config = CacheConfig::default();
    let request = request_context(&get("/"));
    let mut cache = Cache::new(&config, &request);
    cache.add_tag("line\nbreak");

    let mut response = Response::new(());
    let error = response.apply_directives(&cache.cache()).unwrap_err();
    assert!(matches!(error, Error::InvalidHeaderValue(_)));
    assert!(response.headers().is_empty());
}
