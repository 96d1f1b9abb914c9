use lscache::ConfigurationError;
use thiserror::Error;

/// Error loading a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid YAML or does not match [`ConfigCache`](crate::ConfigCache).
    #[error("failed to parse cache configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    /// The configuration file could not be read.
    #[error("failed to read cache configuration: {0}")]
    Io(#[from] std::io::Error),

    /// An entry of `verbs` is not an HTTP method token.
    #[error("invalid HTTP method `{0}` in verbs")]
    InvalidVerb(String),

    /// The cache policy rejected a value.
    #[error(transparent)]
    Cache(#[from] ConfigurationError),
}
