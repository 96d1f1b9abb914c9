use std::time::Duration;

use lscache::{CacheConfig, CacheType, ConfigurationError, Values};
use lscache_configuration::{ConfigCache, ConfigError, from_path, from_str};
use pretty_assertions::assert_eq;

#[test]
fn test_full_document() {
    let yaml = r#"
enabled: true
type: private
lifetime: 2h
esi: true
bypass_cookie: nocache
excluded_urls: ["/admin*", "checkout*"]
excluded_query_strings: "preview=*"
ajax: true
verbs: [GET, HEAD, OPTIONS]
"#;
    let config = from_str(yaml).expect("failed to load");

    let expected = CacheConfig::builder()
        .cache_type(CacheType::Private)
        .lifetime(7200)
        .esi(true)
        .bypass_cookie("nocache")
        .excluded_urls(["/admin*", "checkout*"])
        .excluded_query_strings("preview=*")
        .ajax_cacheable(true)
        .cacheable_verbs(["GET", "HEAD", "OPTIONS"])
        .build();
    assert_eq!(config, expected);
}

#[test]
fn test_empty_mapping_is_default() {
    let config = from_str("{}").expect("failed to load");
    assert_eq!(config, CacheConfig::default());
}

#[test]
fn test_scalar_and_list_patterns() {
    let yaml = r#"
excluded_urls: /blog
excluded_query_strings:
  - "foo=*"
  - "bar=*"
"#;
    let raw: ConfigCache = serde_saphyr::from_str(yaml).expect("failed to deserialize");
    assert_eq!(raw.excluded_urls, Some(Values::One("/blog".to_string())));
    assert_eq!(
        raw.excluded_query_strings,
        Some(Values::Many(vec!["foo=*".to_string(), "bar=*".to_string()]))
    );
}

#[test]
fn test_humantime_lifetime() {
    let raw: ConfigCache = serde_saphyr::from_str("lifetime: 1m 30s").expect("failed to deserialize");
    assert_eq!(raw.lifetime, Some(Duration::from_secs(90)));
    assert_eq!(raw.into_config().expect("failed to convert").lifetime(), 90);
}

#[test]
fn test_sub_second_lifetime_rounds_up() {
    let config = from_str("lifetime: 500ms").expect("failed to load");
    assert_eq!(config.lifetime(), 1);
    let config = from_str("lifetime: 1s 1ms").expect("failed to load");
    assert_eq!(config.lifetime(), 2);
    let config = from_str("lifetime: 0s").expect("failed to load");
    assert_eq!(config.lifetime(), 0);
}

#[test]
fn test_disabled() {
    let config = from_str("enabled: false").expect("failed to load");
    assert!(!config.enabled());
}

#[test]
fn test_invalid_type() {
    let error = from_str("type: foo").unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Cache(ConfigurationError::UnsupportedCacheType(ref value)) if value == "foo"
    ));
}

#[test]
fn test_invalid_verb() {
    let error = from_str(r#"verbs: ["GET", "NOT A VERB"]"#).unwrap_err();
    assert!(matches!(error, ConfigError::InvalidVerb(ref verb) if verb == "NOT A VERB"));
}

#[test]
fn test_unknown_key_is_rejected() {
    let error = from_str("lifetme: 2h").unwrap_err();
    assert!(matches!(error, ConfigError::Yaml(_)));
}

#[test]
fn test_missing_file() {
    let error = from_path("/nonexistent/lscache.yaml").unwrap_err();
    assert!(matches!(error, ConfigError::Io(_)));
}
