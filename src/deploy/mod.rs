//! Deployment of compiled definitions against the two external
//! collaborators: a key/value document store and the execution engine.
//! Both are injected as trait objects so tests can substitute fakes.

mod coordinator;
mod definition;

pub use coordinator::*;
pub use definition::*;

use crate::error::CollaboratorError;

/// Key/value persistence for raw process documents. Last write wins; no
/// transactionality is assumed.
pub trait DocumentStore {
    /// Returns the stored document text for `(definition_id, version)`, if any.
    fn load(&self, definition_id: &str, version: &str)
    -> Result<Option<String>, CollaboratorError>;

    fn save(
        &self,
        definition_id: &str,
        version: &str,
        bpmn_xml: &str,
    ) -> Result<(), CollaboratorError>;
}

/// The execution engine boundary. The engine parses and stores registered
/// documents itself; this crate only hands over the serialized text.
pub trait ProcessEngine {
    /// Returns a handle if the engine already caches a registered definition
    /// for `(definition_id, version)`.
    fn cached_definition(
        &self,
        definition_id: &str,
        version: &str,
    ) -> Result<Option<ProcessHandle>, CollaboratorError>;

    fn register(&self, bpmn_xml: &str) -> Result<(), CollaboratorError>;
}

/// Handle to a definition already registered with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub definition_id: String,
    pub version: String,
}
