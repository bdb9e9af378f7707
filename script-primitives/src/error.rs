//! Shared error definitions for script primitives.

use thiserror::Error;

/// Result alias used throughout the script host.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating script primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// A config flag token was not recognised, even via the legacy aliases.
    #[error("unknown config flag token `{token}`")]
    UnknownFlagToken {
        /// The offending token string.
        token: String,
    },

    /// Config item definition failed validation.
    #[error("invalid config item: {reason}")]
    InvalidConfigItem {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Declared API version is not a member of the supported list.
    #[error("unsupported API version `{version}`")]
    UnsupportedApiVersion {
        /// The declared version string.
        version: String,
    },
}
