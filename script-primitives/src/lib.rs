//! Core shared value types for the scripted-agent host.

#![warn(missing_docs, clippy::pedantic)]

mod api_version;
mod config;
mod error;

/// Opaque API compatibility tiers and the fixed supported list.
pub use api_version::{ApiVersion, SUPPORTED_API_VERSIONS};
/// Configurable-setting descriptors and behavior flags.
pub use config::{ConfigFlags, ConfigItem, ConfigItemBuilder};
/// Error type and result alias shared across the host.
pub use error::{Error, Result};
