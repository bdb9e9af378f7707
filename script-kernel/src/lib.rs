//! Registration core for scripted agents loaded into a host simulation.
//!
//! Scripts announce themselves through a declarative registration call; this
//! crate validates the declaration through a bounded call surface into the
//! scripting engine, normalizes legacy compatibility fields, negotiates the
//! declared API version, and binds the resulting descriptor in a registry
//! under a stable identity.

#![warn(missing_docs, clippy::pedantic)]

mod agent;
mod descriptor;
mod engine;
mod error;
mod library;
mod registry;

/// Agent descriptors, the agent registration entry point, and the built-in
/// start-date setting.
pub use agent::{AgentInfo, register_agent, start_date_setting};
/// The shared base descriptor.
pub use descriptor::{SHORT_NAME_LEN, ScriptInfo};
/// Bounded call surface into the scripting engine.
pub use engine::{CallOutcome, MAX_ACCESSOR_OPS, ObjectHandle, ScriptEngine, ScriptValue};
/// Registration error taxonomy.
pub use error::{RegistrationError, RegistrationResult};
/// Library descriptors and the library registration entry point.
pub use library::{LibraryInfo, register_library};
/// Descriptor storage collaborators.
pub use registry::{
    InMemoryRegistry, RegisteredScript, RegistryError, RegistryResult, ScriptRegistry,
};
