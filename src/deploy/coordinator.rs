use super::{DocumentStore, ProcessDefinition, ProcessEngine};
use crate::canvas::FlowCanvas;
use crate::document;
use crate::error::{CollaboratorError, DeployError};
use tracing::{debug, info, warn};

/// Coordinates compilation, persistence, and engine registration.
///
/// Registration is at-most-once per `(definition_id, version)`: once the
/// engine caches a definition for the key, later deploys only refresh the
/// stored text. The lookup-then-register against the engine is not atomic;
/// callers racing deploys of the same key need an idempotent registration
/// primitive in the engine or a per-key lock around `deploy`.
pub struct Deployer {
    store: Box<dyn DocumentStore>,
    engine: Box<dyn ProcessEngine>,
}

impl Deployer {
    pub fn new(store: Box<dyn DocumentStore>, engine: Box<dyn ProcessEngine>) -> Self {
        Self { store, engine }
    }

    /// Compiles the canvas and deploys the resulting document.
    ///
    /// The stored text always reflects the latest compile, overwriting any
    /// previous document for the key with a warning. Collaborator failures
    /// are wrapped with the definition key and not retried here; a failed
    /// registration after a successful store write leaves the key in a
    /// "documented but not registered" state that the next deploy repairs.
    pub fn deploy(&self, canvas: &mut FlowCanvas) -> Result<ProcessDefinition, DeployError> {
        let (definition_id, version) = canvas.definition_key();
        let model = canvas.compile()?;
        let bpmn_xml = document::render(&model, &definition_id, &version)?;

        let existing = self
            .store
            .load(&definition_id, &version)
            .map_err(store_err(&definition_id, &version))?;
        if existing.is_some() {
            warn!(%definition_id, %version, "document already stored for this key, overwriting");
        }
        self.store
            .save(&definition_id, &version, &bpmn_xml)
            .map_err(store_err(&definition_id, &version))?;

        let cached = self
            .engine
            .cached_definition(&definition_id, &version)
            .map_err(engine_err(&definition_id, &version))?;
        match cached {
            Some(_) => {
                debug!(%definition_id, %version, "definition already registered, skipping registration");
            }
            None => {
                self.engine
                    .register(&bpmn_xml)
                    .map_err(engine_err(&definition_id, &version))?;
                info!(%definition_id, %version, "registered process definition");
            }
        }

        Ok(ProcessDefinition {
            definition_id,
            version,
            bpmn_xml,
        })
    }
}

fn store_err(
    definition_id: &str,
    version: &str,
) -> impl FnOnce(CollaboratorError) -> DeployError {
    let definition_id = definition_id.to_string();
    let version = version.to_string();
    move |source| DeployError::Store {
        definition_id,
        version,
        source,
    }
}

fn engine_err(
    definition_id: &str,
    version: &str,
) -> impl FnOnce(CollaboratorError) -> DeployError {
    let definition_id = definition_id.to_string();
    let version = version.to_string();
    move |source| DeployError::Engine {
        definition_id,
        version,
        source,
    }
}
