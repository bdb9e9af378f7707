//! Registration error taxonomy.

use thiserror::Error;

use crate::registry::RegistryError;

/// Result alias for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors surfaced while validating a script declaration.
///
/// Every failure is returned to the calling engine; nothing in the
/// registration core panics across that boundary.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A mandatory accessor is missing from the script object.
    #[error("script declares no `{method}` accessor")]
    MissingMethod {
        /// Name of the missing accessor.
        method: &'static str,
    },

    /// An accessor call failed or exceeded its operation budget.
    #[error("accessor `{method}` failed: {reason}")]
    CallFailed {
        /// Name of the offending accessor.
        method: &'static str,
        /// Engine-supplied failure description.
        reason: String,
    },

    /// An accessor returned a value of the wrong type.
    #[error("accessor `{method}` returned {actual}, expected {expected}")]
    WrongType {
        /// Name of the offending accessor.
        method: &'static str,
        /// Kind the protocol expected.
        expected: &'static str,
        /// Kind the script actually returned.
        actual: &'static str,
    },

    /// A declared field value violates a descriptor invariant.
    #[error("invalid declaration: {reason}")]
    InvalidDeclaration {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The declared API version is not in the supported list.
    #[error("script `{script}` version {version} declared unsupported API version `{declared}`")]
    UnsupportedApiVersion {
        /// Declared script name.
        script: String,
        /// Declared script version.
        version: u32,
        /// The rejected API version string.
        declared: String,
    },

    /// The registry refused the computed identity.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A config-item declaration failed primitive validation.
    #[error(transparent)]
    Config(#[from] script_primitives::Error),
}
