//! Bounded call surface into the untrusted script VM.
//!
//! The registration core never talks to a concrete scripting runtime. It sees
//! script objects through this capability-checked abstraction: a method is
//! either present or absent, and every invocation carries a fixed operation
//! budget so a misbehaving declaration cannot hang the host.

use script_primitives::ConfigItem;

/// Maximum engine operations a single accessor call may spend.
///
/// Exceeding the budget is reported as [`CallOutcome::Failed`], never a hang.
pub const MAX_ACCESSOR_OPS: u32 = 1000;

/// Opaque handle naming a script object that lives inside the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    /// Wraps a raw engine-side object identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Value produced by a successful accessor call.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptValue {
    /// Signed integer result.
    Integer(i64),
    /// Boolean result.
    Boolean(bool),
    /// Owned string result.
    Text(String),
    /// Config-item declarations collected from the script.
    Settings(Vec<ConfigItem>),
}

impl ScriptValue {
    /// Returns a short label for the value kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "text",
            Self::Settings(_) => "settings",
        }
    }
}

/// Tagged result of a bounded accessor call.
#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
    /// The method ran to completion within budget.
    Value(ScriptValue),
    /// The object declares no such method.
    Absent,
    /// The method exists but the call failed, including budget exhaustion.
    Failed {
        /// Engine-supplied failure description.
        reason: String,
    },
}

/// Trait implemented by scripting-engine bindings.
///
/// Descriptors keep a non-owning handle to the engine so the simulation can
/// later re-invoke read-only queries on the original script object.
pub trait ScriptEngine: Send + Sync {
    /// Returns `true` when the object declares the named method.
    fn has_method(&self, object: ObjectHandle, method: &str) -> bool;

    /// Invokes the named method with the given operation budget.
    fn call_method(&self, object: ObjectHandle, method: &str, ops_budget: u32) -> CallOutcome;
}
