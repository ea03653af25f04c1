//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, MediaSpecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaSpecError {
    /// A value broke a structural invariant at construction or mutation time
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two capability values have no common subset
    #[error("Incompatible: {0}")]
    Incompatible(String),

    /// No usable capability is left on one of the sides
    #[error("Negotiation failed: {0}")]
    NegotiationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MediaSpecError {
    pub fn is_incompatible(&self) -> bool {
        matches!(self, MediaSpecError::Incompatible(_))
    }
}

impl From<config::ConfigError> for MediaSpecError {
    fn from(err: config::ConfigError) -> Self {
        MediaSpecError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for MediaSpecError {
    fn from(err: toml::de::Error) -> Self {
        MediaSpecError::Config(err.to_string())
    }
}
