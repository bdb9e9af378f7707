//! End-to-end registration flows through the public API.

use std::collections::HashMap;
use std::sync::Arc;

use script_kernel::{
    AgentInfo, CallOutcome, InMemoryRegistry, ObjectHandle, RegisteredScript, RegistrationError,
    ScriptEngine, ScriptRegistry, ScriptValue, register_agent, register_library,
};
use script_primitives::{ApiVersion, ConfigItem};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Engine double hosting several script objects, keyed by object handle.
#[derive(Default)]
struct ScanEngine {
    objects: HashMap<u64, HashMap<String, CallOutcome>>,
}

impl ScanEngine {
    fn add_object(&mut self, handle: u64, methods: &[(&str, ScriptValue)]) {
        let table = methods
            .iter()
            .map(|(name, value)| ((*name).to_owned(), CallOutcome::Value(value.clone())))
            .collect();
        self.objects.insert(handle, table);
    }
}

impl ScriptEngine for ScanEngine {
    fn has_method(&self, object: ObjectHandle, method: &str) -> bool {
        self.objects
            .get(&object.raw())
            .is_some_and(|table| table.contains_key(method))
    }

    fn call_method(&self, object: ObjectHandle, method: &str, _ops_budget: u32) -> CallOutcome {
        self.objects
            .get(&object.raw())
            .and_then(|table| table.get(method))
            .cloned()
            .unwrap_or(CallOutcome::Absent)
    }
}

fn base_declaration(name: &str, short_name: &str, version: i64) -> Vec<(&'static str, ScriptValue)> {
    vec![
        ("GetAuthor", ScriptValue::Text("Integration Author".into())),
        ("GetName", ScriptValue::Text(name.into())),
        ("GetShortName", ScriptValue::Text(short_name.into())),
        ("GetDescription", ScriptValue::Text("An integration script".into())),
        ("GetDate", ScriptValue::Text("2026-08-25".into())),
        ("GetVersion", ScriptValue::Integer(version)),
        ("GetInstanceName", ScriptValue::Text(name.into())),
    ]
}

#[test]
fn scan_cycle_registers_agents_and_libraries() {
    init_tracing();
    let mut engine = ScanEngine::default();

    let mut hauler = base_declaration("Hauler", "HAUL", 5);
    hauler.push(("MinVersionToLoad", ScriptValue::Integer(4)));
    hauler.push(("GetApiVersion", ScriptValue::Text("1.6".into())));
    hauler.push((
        "GetSettings",
        ScriptValue::Settings(vec![
            ConfigItem::builder("aggressiveness")
                .description("How eagerly the agent expands")
                .range(0, 10)
                .default_value(5)
                .build()
                .expect("valid setting"),
        ]),
    ));
    engine.add_object(1, &hauler);

    let mut pathlib = base_declaration("AStar", "ASTR", 2);
    pathlib.push(("GetCategory", ScriptValue::Text("pathfinding".into())));
    engine.add_object(2, &pathlib);

    let engine: Arc<dyn ScriptEngine> = Arc::new(engine);
    let registry = InMemoryRegistry::new();

    register_agent(&engine, ObjectHandle::new(1), &registry).expect("agent registers");
    register_library(&engine, ObjectHandle::new(2), &registry).expect("library registers");

    assert_eq!(registry.len(), 2);

    let agent = registry.get("Hauler").expect("agent identity is the bare name");
    let RegisteredScript::Agent(agent) = agent.as_ref() else {
        panic!("expected agent descriptor");
    };
    assert_eq!(agent.min_loadable_version(), 4);
    assert_eq!(agent.api_version().as_str(), "1.6");
    assert_eq!(agent.base().config()[0].name(), "start_date");
    assert_eq!(agent.base().config()[1].name(), "aggressiveness");
    assert!(agent.can_load_from_version(Some(4)));
    assert!(!agent.can_load_from_version(Some(3)));

    let library = registry
        .get("pathfinding.AStar")
        .expect("library identity is category-qualified");
    let RegisteredScript::Library(library) = library.as_ref() else {
        panic!("expected library descriptor");
    };
    assert_eq!(library.category(), "pathfinding");
}

#[test]
fn failed_script_is_skipped_and_scan_continues() {
    init_tracing();
    let mut engine = ScanEngine::default();

    // Declares an API level the host does not support.
    let mut broken = base_declaration("Broken", "BRKN", 1);
    broken.push(("GetApiVersion", ScriptValue::Text("0.1".into())));
    engine.add_object(1, &broken);

    engine.add_object(2, &base_declaration("Working", "WORK", 1));

    let engine: Arc<dyn ScriptEngine> = Arc::new(engine);
    let registry = InMemoryRegistry::new();

    let err = register_agent(&engine, ObjectHandle::new(1), &registry)
        .expect_err("unsupported API version");
    assert!(matches!(
        err,
        RegistrationError::UnsupportedApiVersion { ref script, .. } if script == "Broken"
    ));
    assert!(registry.is_empty());

    register_agent(&engine, ObjectHandle::new(2), &registry).expect("next script still registers");
    assert_eq!(registry.identities(), ["Working"]);
}

#[test]
fn duplicate_identity_is_refused_until_rescan() {
    init_tracing();
    let mut engine = ScanEngine::default();
    engine.add_object(1, &base_declaration("Twin", "TWIN", 1));
    engine.add_object(2, &base_declaration("Twin", "TWNB", 2));

    let engine: Arc<dyn ScriptEngine> = Arc::new(engine);
    let registry = InMemoryRegistry::new();

    register_agent(&engine, ObjectHandle::new(1), &registry).expect("first registers");
    let err = register_agent(&engine, ObjectHandle::new(2), &registry)
        .expect_err("same declared name collides");
    assert!(matches!(err, RegistrationError::Registry(_)));
    assert_eq!(registry.len(), 1);

    registry.clear();
    register_agent(&engine, ObjectHandle::new(2), &registry).expect("registers after rescan");
    let script = registry.get("Twin").expect("registered");
    assert_eq!(script.version(), 2);
}

#[test]
fn fallback_descriptor_backs_an_empty_scan() {
    init_tracing();
    let registry = InMemoryRegistry::new();
    assert!(registry.is_empty());

    let dummy = AgentInfo::fallback();
    assert_eq!(dummy.base().name(), "DummyAgent");
    assert_eq!(dummy.api_version(), &ApiVersion::newest());
    assert!(dummy.can_load_from_version(Some(42)));

    let identity = dummy.base().name().to_owned();
    registry
        .register(identity, RegisteredScript::Agent(dummy))
        .expect("fallback registers under its synthetic name");
    assert_eq!(registry.identities(), ["DummyAgent"]);
}
