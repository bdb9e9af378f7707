//! Base descriptor shared by agent and library scripts, and the construction
//! protocol that populates it from a registering script object.

use std::fmt;
use std::sync::Arc;

use script_primitives::ConfigItem;
use tracing::debug;

use crate::engine::{CallOutcome, MAX_ACCESSOR_OPS, ObjectHandle, ScriptEngine, ScriptValue};
use crate::error::{RegistrationError, RegistrationResult};

/// Canonical length of a script's short name.
pub const SHORT_NAME_LEN: usize = 4;

/// Fully validated base descriptor for a registered script.
///
/// Constructed once per registration call and immutable afterwards. String
/// fields are owned, so the descriptor outlives the transient registration
/// call that produced it.
pub struct ScriptInfo {
    name: String,
    short_name: String,
    author: String,
    description: String,
    date: String,
    version: u32,
    instance_name: String,
    main_script: Option<String>,
    config: Vec<ConfigItem>,
    engine: Option<Arc<dyn ScriptEngine>>,
}

impl fmt::Debug for ScriptInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptInfo")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("version", &self.version)
            .field("instance_name", &self.instance_name)
            .field("config", &self.config.len())
            .field("engine", &self.engine.is_some())
            .finish_non_exhaustive()
    }
}

impl ScriptInfo {
    /// Returns the declared script name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fixed-width short name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the declared author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared release date string.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the declared version, always positive.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the symbol used to re-instantiate the script in the engine.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Returns the main script path, when the script declared one.
    #[must_use]
    pub fn main_script(&self) -> Option<&str> {
        self.main_script.as_deref()
    }

    /// Returns the ordered config-item list.
    #[must_use]
    pub fn config(&self) -> &[ConfigItem] {
        &self.config
    }

    /// Returns the engine this descriptor was registered through, absent only
    /// for host-synthesized fallback descriptors.
    #[must_use]
    pub fn engine(&self) -> Option<&Arc<dyn ScriptEngine>> {
        self.engine.as_ref()
    }

    pub(crate) fn prepend_config(&mut self, item: ConfigItem) -> RegistrationResult<()> {
        if self.config.iter().any(|existing| existing.name() == item.name()) {
            return Err(RegistrationError::InvalidDeclaration {
                reason: format!(
                    "script `{}` redeclares the built-in `{}` setting",
                    self.name,
                    item.name()
                ),
            });
        }
        self.config.insert(0, item);
        Ok(())
    }

    pub(crate) fn synthesized(
        name: &str,
        short_name: &str,
        author: &str,
        description: &str,
        date: &str,
        version: u32,
        main_script: &str,
    ) -> Self {
        Self {
            name: name.to_owned(),
            short_name: short_name.to_owned(),
            author: author.to_owned(),
            description: description.to_owned(),
            date: date.to_owned(),
            version,
            instance_name: name.to_owned(),
            main_script: Some(main_script.to_owned()),
            config: Vec::new(),
            engine: None,
        }
    }
}

/// Reads the shared declared fields off a registering script object.
///
/// Mandatory accessors are invoked in a fixed order through the bounded call
/// path; the first failure short-circuits the rest and no partial descriptor
/// escapes.
pub(crate) struct ScriptConstructor<'a> {
    engine: &'a Arc<dyn ScriptEngine>,
    object: ObjectHandle,
}

impl<'a> ScriptConstructor<'a> {
    pub(crate) const fn new(engine: &'a Arc<dyn ScriptEngine>, object: ObjectHandle) -> Self {
        Self { engine, object }
    }

    pub(crate) fn construct(&self) -> RegistrationResult<ScriptInfo> {
        let author = self.required_text("GetAuthor")?;
        let name = self.required_text("GetName")?;
        if name.trim().is_empty() {
            return Err(RegistrationError::InvalidDeclaration {
                reason: "script name cannot be empty".into(),
            });
        }

        let short_name = self.required_text("GetShortName")?;
        if short_name.len() != SHORT_NAME_LEN {
            return Err(RegistrationError::InvalidDeclaration {
                reason: format!(
                    "script `{name}` short name `{short_name}` must be exactly {SHORT_NAME_LEN} characters"
                ),
            });
        }

        let description = self.required_text("GetDescription")?;
        let date = self.required_text("GetDate")?;

        let raw_version = self.required_integer("GetVersion")?;
        let version = u32::try_from(raw_version).ok().filter(|v| *v > 0).ok_or_else(|| {
            RegistrationError::InvalidDeclaration {
                reason: format!("script `{name}` declares non-positive version {raw_version}"),
            }
        })?;

        let instance_name = self.required_text("GetInstanceName")?;
        if instance_name.trim().is_empty() {
            return Err(RegistrationError::InvalidDeclaration {
                reason: format!("script `{name}` declares an empty instance name"),
            });
        }

        let main_script = if self.has_method("GetMainScript") {
            Some(self.required_text("GetMainScript")?)
        } else {
            None
        };

        let config = if self.has_method("GetSettings") {
            self.required_settings("GetSettings")?
        } else {
            Vec::new()
        };

        for (index, item) in config.iter().enumerate() {
            if config[..index].iter().any(|other| other.name() == item.name()) {
                return Err(RegistrationError::InvalidDeclaration {
                    reason: format!(
                        "script `{name}` declares duplicate setting `{}`",
                        item.name()
                    ),
                });
            }
        }

        debug!(script = %name, version, "script declaration validated");

        Ok(ScriptInfo {
            name,
            short_name,
            author,
            description,
            date,
            version,
            instance_name,
            main_script,
            config,
            engine: Some(Arc::clone(self.engine)),
        })
    }

    pub(crate) fn has_method(&self, method: &str) -> bool {
        self.engine.has_method(self.object, method)
    }

    fn call(&self, method: &'static str) -> RegistrationResult<ScriptValue> {
        match self.engine.call_method(self.object, method, MAX_ACCESSOR_OPS) {
            CallOutcome::Value(value) => Ok(value),
            CallOutcome::Absent => Err(RegistrationError::MissingMethod { method }),
            CallOutcome::Failed { reason } => Err(RegistrationError::CallFailed { method, reason }),
        }
    }

    pub(crate) fn required_text(&self, method: &'static str) -> RegistrationResult<String> {
        match self.call(method)? {
            ScriptValue::Text(text) => Ok(text),
            other => Err(RegistrationError::WrongType {
                method,
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    pub(crate) fn required_integer(&self, method: &'static str) -> RegistrationResult<i64> {
        match self.call(method)? {
            ScriptValue::Integer(value) => Ok(value),
            other => Err(RegistrationError::WrongType {
                method,
                expected: "integer",
                actual: other.kind(),
            }),
        }
    }

    pub(crate) fn required_bool(&self, method: &'static str) -> RegistrationResult<bool> {
        match self.call(method)? {
            ScriptValue::Boolean(value) => Ok(value),
            other => Err(RegistrationError::WrongType {
                method,
                expected: "boolean",
                actual: other.kind(),
            }),
        }
    }

    fn required_settings(&self, method: &'static str) -> RegistrationResult<Vec<ConfigItem>> {
        match self.call(method)? {
            ScriptValue::Settings(items) => Ok(items),
            other => Err(RegistrationError::WrongType {
                method,
                expected: "settings",
                actual: other.kind(),
            }),
        }
    }
}
