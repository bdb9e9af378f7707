//! Scripted-agent hosting facade.
//!
//! Depend on this crate via `cargo add sim-scripts`. It bundles the host's
//! registration crates behind feature flags so embedders can pull in only the
//! pieces their simulation needs.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared value types for convenience.
pub use script_primitives as primitives;

/// Registration core (enabled by the `kernel` feature).
#[cfg(feature = "kernel")]
pub use script_kernel as kernel;
