//! Registry collaborator that takes ownership of validated descriptors.
//!
//! The registration core only computes identities; collision detection and
//! storage live here. The registry is created once at host startup and is
//! cleared and repopulated on each script-directory rescan.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;

use crate::agent::AgentInfo;
use crate::library::LibraryInfo;

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by descriptor storage.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The computed identity is already present.
    #[error("script identity `{identity}` is already registered")]
    DuplicateIdentity {
        /// The colliding identity string.
        identity: String,
    },
}

/// A fully validated descriptor handed over by the registration core.
#[derive(Debug)]
pub enum RegisteredScript {
    /// Top-level executable agent script.
    Agent(AgentInfo),
    /// Shared library script.
    Library(LibraryInfo),
}

impl RegisteredScript {
    /// Returns the declared script name, regardless of kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Agent(info) => info.base().name(),
            Self::Library(info) => info.base().name(),
        }
    }

    /// Returns the declared version, regardless of kind.
    #[must_use]
    pub fn version(&self) -> u32 {
        match self {
            Self::Agent(info) => info.base().version(),
            Self::Library(info) => info.base().version(),
        }
    }
}

/// Trait implemented by descriptor stores.
pub trait ScriptRegistry: Send + Sync {
    /// Takes ownership of a descriptor under the computed identity.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentity`] when the identity is
    /// already bound.
    fn register(&self, identity: String, script: RegisteredScript) -> RegistryResult<()>;
}

/// In-memory registry keyed by identity string.
///
/// Registered descriptors are immutable, so any number of readers may hold
/// the returned handles concurrently.
#[derive(Default)]
pub struct InMemoryRegistry {
    inner: RwLock<HashMap<String, Arc<RegisteredScript>>>,
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("script registry poisoned");
        let identities: Vec<_> = inner.keys().cloned().collect();
        f.debug_struct("InMemoryRegistry")
            .field("registered", &identities)
            .finish()
    }
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor bound to the supplied identity.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<Arc<RegisteredScript>> {
        let inner = self.inner.read().ok()?;
        inner.get(identity).cloned()
    }

    /// Lists all bound identities.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn identities(&self) -> Vec<String> {
        let inner = self.inner.read().expect("script registry poisoned");
        inner.keys().cloned().collect()
    }

    /// Returns the number of registered descriptors.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("script registry poisoned").len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every registration, ready for a directory rescan.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn clear(&self) {
        self.inner.write().expect("script registry poisoned").clear();
    }
}

impl ScriptRegistry for InMemoryRegistry {
    fn register(&self, identity: String, script: RegisteredScript) -> RegistryResult<()> {
        let mut inner = self.inner.write().expect("script registry poisoned");
        if inner.contains_key(&identity) {
            return Err(RegistryError::DuplicateIdentity { identity });
        }

        debug!(identity = %identity, script = %script.name(), "descriptor stored");
        inner.insert(identity, Arc::new(script));
        Ok(())
    }
}
