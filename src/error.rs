//! Error types shared by the filter, mask and configuration layers.

use std::path::PathBuf;

/// Errors raised while building or evaluating a filter chain.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The regular expression of a pattern filter did not compile.
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A predicate gave up on the candidate instead of answering yes or no.
    #[error("filter predicate failed: {message}")]
    Predicate { message: String },
}

impl FilterError {
    pub fn predicate(message: impl Into<String>) -> Self {
        Self::Predicate {
            message: message.into(),
        }
    }
}

/// Errors raised while parsing a mask or building a provider for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    #[error("mask defines no positions")]
    Empty,

    #[error("mask ends with an unfinished escape sequence")]
    TrailingEscape,

    #[error("prompt character {0:?} is not printable")]
    InvalidPromptChar(char),
}

/// Errors surfaced by the masked text box while handling input or configuration.
#[derive(Debug, thiserror::Error)]
pub enum MaskedInputError {
    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Errors raised while loading the demo configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
