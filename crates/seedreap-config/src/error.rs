//! Configuration errors.

use thiserror::Error;

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading the configuration.
///
/// All of them are fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A single required variable was not set (or was empty).
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// Several required connection variables were not set.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingMany(Vec<&'static str>),

    /// A variable was set but could not be parsed.
    #[error("invalid {variable} value {value:?}: {reason}")]
    Invalid {
        /// The variable name.
        variable: &'static str,
        /// The raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        variable: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Invalid {
            variable,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
