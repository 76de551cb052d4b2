use thiserror::Error;

/// A path the strategy's splitter refused to segment.
///
/// This is the only error the matching engine produces: lookups that find
/// nothing return `None` instead.
///
/// ```
/// use segmatch::{InvalidPath, Matcher};
///
/// let mut matcher = Matcher::<()>::router();
/// assert_eq!(matcher.insert(""), Err(InvalidPath::new("")));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
#[error("invalid path: {path:?}")]
pub struct InvalidPath {
    path: String,
}

impl InvalidPath {
    /// Creates an error for the rejected `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The rejected path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Errors that can occur when loading a [`MatcherConfig`](crate::MatcherConfig)
/// or building a matcher from one.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid TOML or does not fit the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A configured pattern was rejected by the strategy.
    #[error("invalid pattern in config: {0}")]
    Pattern(#[from] InvalidPath),
}
