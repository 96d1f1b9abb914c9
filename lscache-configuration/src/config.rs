use std::path::Path;
use std::time::Duration;

use http::Method;
use lscache::{CacheConfig, Values};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cache policy as written in a configuration file.
///
/// Every key is optional; missing keys keep the [`CacheConfig`] default.
///
/// ```yaml
/// enabled: true
/// type: private
/// lifetime: 2h
/// esi: false
/// bypass_cookie: cache_bypass
/// excluded_urls: ["/admin*", "checkout*"]
/// excluded_query_strings: "preview=*"
/// ajax: false
/// verbs: [GET, HEAD]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigCache {
    /// Whether caching is enabled.
    pub enabled: Option<bool>,
    /// `public` or `private`.
    #[serde(rename = "type")]
    pub cache_type: Option<String>,
    /// Cache lifetime, e.g. `"90s"` or `"2h"`. Rounded up to whole seconds.
    #[serde(with = "humantime_serde")]
    pub lifetime: Option<Duration>,
    /// Whether edge side includes are enabled.
    pub esi: Option<bool>,
    /// Name of the bypass cookie and query parameter.
    pub bypass_cookie: Option<String>,
    /// URL exclusion patterns.
    pub excluded_urls: Option<Values>,
    /// Query string exclusion patterns.
    pub excluded_query_strings: Option<Values>,
    /// Whether XHR requests may be cached.
    pub ajax: Option<bool>,
    /// Cacheable request methods.
    pub verbs: Option<Values>,
}

impl ConfigCache {
    /// Applies the configured keys on top of [`CacheConfig::default`].
    ///
    /// # Errors
    ///
    /// Fails on an unsupported cache type or a verb that is not an HTTP
    /// method token.
    pub fn into_config(self) -> Result<CacheConfig, ConfigError> {
        let mut config = CacheConfig::default();

        match self.enabled {
            Some(true) => {
                config.enable();
            }
            Some(false) => {
                config.disable();
            }
            None => {}
        }
        if let Some(cache_type) = self.cache_type {
            config.set_type(&cache_type)?;
        }
        if let Some(lifetime) = self.lifetime {
            config.set_lifetime(whole_seconds(lifetime));
        }
        if let Some(esi) = self.esi {
            config.set_esi(esi);
        }
        if let Some(name) = self.bypass_cookie {
            config.set_bypass_cookie(name);
        }
        if let Some(patterns) = self.excluded_urls {
            config.set_excluded_urls(patterns);
        }
        if let Some(patterns) = self.excluded_query_strings {
            config.set_excluded_query_strings(patterns);
        }
        if let Some(ajax) = self.ajax {
            config.set_ajax_cacheable(ajax);
        }
        if let Some(verbs) = self.verbs {
            let verbs = verbs.into_vec();
            if let Some(invalid) = verbs
                .iter()
                .find(|verb| Method::from_bytes(verb.as_bytes()).is_err())
            {
                return Err(ConfigError::InvalidVerb(invalid.clone()));
            }
            config.set_cacheable_verbs(verbs);
        }

        Ok(config)
    }
}

/// Seconds in `lifetime`, rounding a partial second up so that a short
/// non-zero lifetime never turns into "never cache".
fn whole_seconds(lifetime: Duration) -> u64 {
    lifetime.as_secs() + u64::from(lifetime.subsec_nanos() > 0)
}

/// Parses a YAML document into a [`CacheConfig`].
pub fn from_str(yaml: &str) -> Result<CacheConfig, ConfigError> {
    serde_saphyr::from_str::<ConfigCache>(yaml)?.into_config()
}

/// Reads and parses a YAML file into a [`CacheConfig`].
pub fn from_path(path: impl AsRef<Path>) -> Result<CacheConfig, ConfigError> {
    let yaml = std::fs::read_to_string(path)?;
    from_str(&yaml)
}
