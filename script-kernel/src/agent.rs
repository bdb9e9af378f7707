//! Registration of top-level agent scripts.

use std::sync::Arc;

use script_primitives::{ApiVersion, ConfigItem};
use tracing::{info, warn};

use crate::descriptor::{ScriptConstructor, ScriptInfo};
use crate::engine::{ObjectHandle, ScriptEngine};
use crate::error::{RegistrationError, RegistrationResult};
use crate::registry::{RegisteredScript, ScriptRegistry};

/// Built-in setting appended to the front of every agent's config list.
///
/// Returns a fresh deep copy each call; the host definition is never aliased
/// by a descriptor.
#[must_use]
pub fn start_date_setting() -> ConfigItem {
    ConfigItem::builder("start_date")
        .description("Number of days to start this agent after the previous one")
        .range(0, 3600)
        .default_value(730)
        .build()
        .expect("host start-date definition is valid")
}

/// Descriptor for a top-level executable agent script.
#[derive(Debug)]
pub struct AgentInfo {
    base: ScriptInfo,
    min_loadable_version: u32,
    use_as_random: bool,
    api_version: ApiVersion,
    fallback: bool,
}

impl AgentInfo {
    /// Returns the shared base descriptor.
    #[must_use]
    pub fn base(&self) -> &ScriptInfo {
        &self.base
    }

    /// Lowest version of this agent's own save format it can still load.
    #[must_use]
    pub const fn min_loadable_version(&self) -> u32 {
        self.min_loadable_version
    }

    /// Whether the agent is eligible for random selection.
    #[must_use]
    pub const fn use_as_random(&self) -> bool {
        self.use_as_random
    }

    /// API level the agent declared itself against.
    #[must_use]
    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns whether a previously recorded version is loadable by this
    /// registration.
    ///
    /// `None` is the unspecified sentinel and is always loadable; otherwise
    /// the version must fall inside `min_loadable_version..=version`. The
    /// host-synthesized fallback accepts any recorded version.
    #[must_use]
    pub fn can_load_from_version(&self, version: Option<u32>) -> bool {
        if self.fallback {
            return true;
        }
        match version {
            None => true,
            Some(v) => v >= self.min_loadable_version && v <= self.base.version(),
        }
    }

    /// Host-synthesized placeholder used when no real agent scripts are
    /// installed.
    ///
    /// Bypasses the accessor protocol entirely: identity fields are synthetic,
    /// the newest API level is assumed, and any recorded version is loadable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            base: ScriptInfo::synthesized(
                "DummyAgent",
                "DUMM",
                "Host Developers",
                "A dummy agent loaded when no agent scripts are installed",
                "2008-07-26",
                1,
                "%_dummy",
            ),
            min_loadable_version: 0,
            use_as_random: false,
            api_version: ApiVersion::newest(),
            fallback: true,
        }
    }
}

/// Registration entry point invoked by the scripting engine when an agent
/// script module announces itself.
///
/// On success the fully validated descriptor is handed to the registry under
/// its declared name. On any failure the half-built descriptor is discarded
/// and an error is returned to the engine so it can continue scanning.
///
/// # Errors
///
/// Returns [`RegistrationError`] when a mandatory accessor is missing, a
/// bounded call fails, a declared value violates a descriptor invariant, the
/// declared API version is unsupported, or the registry refuses the identity.
pub fn register_agent(
    engine: &Arc<dyn ScriptEngine>,
    object: ObjectHandle,
    registry: &dyn ScriptRegistry,
) -> RegistrationResult<()> {
    let constructor = ScriptConstructor::new(engine, object);
    let mut base = constructor.construct()?;

    base.prepend_config(start_date_setting())?;

    let min_loadable_version = if constructor.has_method("MinVersionToLoad") {
        let raw = constructor.required_integer("MinVersionToLoad")?;
        u32::try_from(raw)
            .ok()
            .filter(|m| *m <= base.version())
            .ok_or_else(|| RegistrationError::InvalidDeclaration {
                reason: format!(
                    "script `{}` declares min loadable version {raw} outside 0..={}",
                    base.name(),
                    base.version()
                ),
            })?
    } else {
        // Default to the declared version: nothing older is loadable.
        base.version()
    };

    let use_as_random = if constructor.has_method("UseAsRandom") {
        constructor.required_bool("UseAsRandom")?
    } else {
        true
    };

    let api_version = if constructor.has_method("GetApiVersion") {
        let declared = constructor.required_text("GetApiVersion")?;
        match ApiVersion::new(&declared) {
            Ok(version) => version,
            Err(_) => {
                warn!(
                    script = %base.name(),
                    version = base.version(),
                    declared = %declared,
                    "script declared an unsupported API version"
                );
                return Err(RegistrationError::UnsupportedApiVersion {
                    script: base.name().to_owned(),
                    version: base.version(),
                    declared,
                });
            }
        }
    } else {
        // Scripts predating the declaration mechanism target the oldest level.
        ApiVersion::oldest()
    };

    let identity = base.name().to_owned();
    let info = AgentInfo {
        base,
        min_loadable_version,
        use_as_random,
        api_version,
        fallback: false,
    };

    info!(
        script = %identity,
        version = info.base.version(),
        api = %info.api_version,
        "registering agent script"
    );
    registry.register(identity, RegisteredScript::Agent(info))?;
    Ok(())
}
