//! Common test utilities: canvas builders and in-memory collaborator fakes.
use keiro::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Builds a linear chain `a -> b -> c` of plain task nodes.
#[allow(dead_code)]
pub fn linear_canvas() -> (FlowCanvas, NodeId, NodeId, NodeId) {
    let mut canvas = FlowCanvas::new();
    let a = canvas.add_task("a", "AgentA");
    let b = canvas.add_task("b", "AgentB");
    let c = canvas.add_task("c", "AgentC");
    canvas.set_root(a);
    canvas.attach_next(a, b).expect("a -> b");
    canvas.attach_next(b, c).expect("b -> c");
    (canvas, a, b, c)
}

/// Builds `a` with two conditional branches to `b` and `c` and no explicit
/// else-target, so a no-op fallback is synthesized.
#[allow(dead_code)]
pub fn branched_canvas() -> (FlowCanvas, NodeId, NodeId, NodeId) {
    let mut canvas = FlowCanvas::new();
    let a = canvas.add_task("a", "AgentA");
    let b = canvas.add_task("b", "AgentB");
    let c = canvas.add_task("c", "AgentC");
    canvas.set_root(a);
    canvas.attach_conditional(a, "score > 0.5", b).expect("a ?-> b");
    canvas.attach_conditional(a, "score <= 0.5", c).expect("a ?-> c");
    (canvas, a, b, c)
}

/// Extracts `(id, version)` from the `process` element of a rendered
/// document, the way a real engine would after parsing it.
#[allow(dead_code)]
pub fn parse_process_key(bpmn_xml: &str) -> (String, String) {
    let attr = |name: &str| -> String {
        let marker = format!("{name}=\"");
        let process = bpmn_xml.find("<process").expect("process element");
        let start = bpmn_xml[process..].find(&marker).expect("attribute") + process + marker.len();
        let end = bpmn_xml[start..].find('"').expect("closing quote") + start;
        bpmn_xml[start..end].to_string()
    };
    (attr("id"), attr("version"))
}

#[derive(Default)]
pub struct StoreState {
    pub documents: HashMap<(String, String), String>,
    pub saves: usize,
}

/// In-memory document store recording every save.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub state: Arc<Mutex<StoreState>>,
}

impl DocumentStore for InMemoryStore {
    fn load(
        &self,
        definition_id: &str,
        version: &str,
    ) -> std::result::Result<Option<String>, CollaboratorError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .documents
            .get(&(definition_id.to_string(), version.to_string()))
            .cloned())
    }

    fn save(
        &self,
        definition_id: &str,
        version: &str,
        bpmn_xml: &str,
    ) -> std::result::Result<(), CollaboratorError> {
        let mut state = self.state.lock().unwrap();
        state.saves += 1;
        state.documents.insert(
            (definition_id.to_string(), version.to_string()),
            bpmn_xml.to_string(),
        );
        Ok(())
    }
}

#[derive(Default)]
pub struct EngineState {
    pub registered: HashMap<(String, String), String>,
    pub registrations: usize,
}

/// In-memory engine that parses the registered document for its key, like
/// the real engine does.
#[derive(Clone, Default)]
pub struct InMemoryEngine {
    pub state: Arc<Mutex<EngineState>>,
}

impl ProcessEngine for InMemoryEngine {
    fn cached_definition(
        &self,
        definition_id: &str,
        version: &str,
    ) -> std::result::Result<Option<ProcessHandle>, CollaboratorError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .registered
            .contains_key(&(definition_id.to_string(), version.to_string()))
            .then(|| ProcessHandle {
                definition_id: definition_id.to_string(),
                version: version.to_string(),
            }))
    }

    fn register(&self, bpmn_xml: &str) -> std::result::Result<(), CollaboratorError> {
        let mut state = self.state.lock().unwrap();
        state.registrations += 1;
        let key = parse_process_key(bpmn_xml);
        state.registered.insert(key, bpmn_xml.to_string());
        Ok(())
    }
}

/// Engine whose registration always fails.
#[allow(dead_code)]
pub struct FailingEngine;

impl ProcessEngine for FailingEngine {
    fn cached_definition(
        &self,
        _definition_id: &str,
        _version: &str,
    ) -> std::result::Result<Option<ProcessHandle>, CollaboratorError> {
        Ok(None)
    }

    fn register(&self, _bpmn_xml: &str) -> std::result::Result<(), CollaboratorError> {
        Err("engine unavailable".into())
    }
}

/// Store whose writes always fail.
#[allow(dead_code)]
pub struct FailingStore;

impl DocumentStore for FailingStore {
    fn load(
        &self,
        _definition_id: &str,
        _version: &str,
    ) -> std::result::Result<Option<String>, CollaboratorError> {
        Ok(None)
    }

    fn save(
        &self,
        _definition_id: &str,
        _version: &str,
        _bpmn_xml: &str,
    ) -> std::result::Result<(), CollaboratorError> {
        Err("store unavailable".into())
    }
}
