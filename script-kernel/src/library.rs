//! Registration of shared library scripts.

use std::sync::Arc;

use tracing::info;

use crate::descriptor::{ScriptConstructor, ScriptInfo};
use crate::engine::{ObjectHandle, ScriptEngine};
use crate::error::{RegistrationError, RegistrationResult};
use crate::registry::{RegisteredScript, ScriptRegistry};

/// Descriptor for a reusable library script, consumable by agent scripts.
#[derive(Debug)]
pub struct LibraryInfo {
    base: ScriptInfo,
    category: String,
}

impl LibraryInfo {
    /// Returns the shared base descriptor.
    #[must_use]
    pub fn base(&self) -> &ScriptInfo {
        &self.base
    }

    /// Host-defined grouping the library registered under.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Composite registry identity, `category.instance_name`.
    #[must_use]
    pub fn identity(&self) -> String {
        format!("{}.{}", self.category, self.base.instance_name())
    }
}

/// Registration entry point invoked by the scripting engine when a library
/// module announces itself.
///
/// Libraries have no fallback path: any failure drops the half-built
/// descriptor and nothing reaches the registry. On success the descriptor is
/// stored under the composite `category.instance_name` identity.
///
/// # Errors
///
/// Returns [`RegistrationError`] when the base protocol fails, the mandatory
/// `GetCategory` accessor is missing or fails, the category is empty, or the
/// registry refuses the identity.
pub fn register_library(
    engine: &Arc<dyn ScriptEngine>,
    object: ObjectHandle,
    registry: &dyn ScriptRegistry,
) -> RegistrationResult<()> {
    let constructor = ScriptConstructor::new(engine, object);
    let base = constructor.construct()?;

    if !constructor.has_method("GetCategory") {
        return Err(RegistrationError::MissingMethod {
            method: "GetCategory",
        });
    }
    let category = constructor.required_text("GetCategory")?;
    if category.trim().is_empty() {
        return Err(RegistrationError::InvalidDeclaration {
            reason: format!("library `{}` declares an empty category", base.name()),
        });
    }

    let library = LibraryInfo { base, category };
    let identity = library.identity();

    info!(
        library = %identity,
        version = library.base.version(),
        "registering library script"
    );
    registry.register(identity, RegisteredScript::Library(library))?;
    Ok(())
}
