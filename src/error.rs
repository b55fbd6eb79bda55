use thiserror::Error;

/// A failure reported by an external collaborator (document store or engine).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors caused by an invalid canvas configuration. These are caller
/// mistakes: the graph cannot be compiled and the call is never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "node '{node_id}' configures more than one routing mode; a single successor, conditional branches, and a subflow are mutually exclusive"
    )]
    AmbiguousRouting { node_id: String },

    #[error("'{0}' is a reserved node id")]
    ReservedId(String),

    #[error("canvas has no root node")]
    MissingRoot,

    #[error("subflow node '{node_id}' wraps a canvas with no root node")]
    EmptySubflow { node_id: String },
}

/// Errors that can occur while compiling a canvas into a process document.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal invariant defect: a node carries conditional branches but no
    /// gateway was ever constructed for it. Unreachable through the canvas
    /// API, which creates the gateway on the first branch attachment.
    #[error("node '{node_id}' has conditional branches but no gateway")]
    MissingGateway { node_id: String },

    #[error("failed to serialize process document: {0}")]
    Render(String),
}

/// Errors that can occur while deploying a compiled definition against the
/// document store and the execution engine.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("failed to persist document for definition '{definition_id}' version '{version}'")]
    Store {
        definition_id: String,
        version: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("failed to register definition '{definition_id}' version '{version}' with the engine")]
    Engine {
        definition_id: String,
        version: String,
        #[source]
        source: CollaboratorError,
    },
}
