//! YAML configuration for [`lscache`].
//!
//! ```
//! use lscache::CacheType;
//!
//! let config = lscache_configuration::from_str(
//!     r#"
//! type: private
//! lifetime: 6m
//! excluded_urls: /admin*
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.cache_type(), CacheType::Private);
//! assert_eq!(config.lifetime(), 360);
//! assert_eq!(config.excluded_urls(), ["/admin*"]);
//! ```

mod config;
pub mod error;

pub use config::{ConfigCache, from_path, from_str};
pub use error::ConfigError;
